//! Store module - SQLite key/value persistence for app state
//!
//! Each record lives under its own string key as a JSON document. Missing
//! keys fall back to a default; string keys leave room for versioning.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::coach::CompletionKey;
use crate::exercises::{self, Exercise};
use crate::models::{AiRoutine, ChatMessage, UserProfile, WorkoutLog};

const PROFILE_KEY: &str = "user_profile";
const HISTORY_KEY: &str = "workout_history";
const CATALOG_KEY: &str = "exercises";
const ROUTINE_KEY: &str = "ai_routine";
const COMPLETED_KEY: &str = "ai_completed_exercises";
const CHAT_KEY: &str = "nutrition_chat_history";

/// Key/value store wrapper
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create the store
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store for tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS app_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Read a record, falling back to `default` when the key is absent.
    /// A present but malformed value is an error, not a silent reset.
    fn get_or<T, F>(&self, key: &str, default: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM app_state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .with_context(|| format!("stored value under '{key}' does not match its shape")),
            None => Ok(default()),
        }
    }

    /// Serialize and upsert a record
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO app_state (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, json],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM app_state WHERE key = ?1", params![key])?;
        Ok(())
    }

    // --- profile ---

    pub fn profile(&self) -> Result<UserProfile> {
        self.get_or(PROFILE_KEY, UserProfile::default)
    }

    /// Full replacement of the stored profile
    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.set(PROFILE_KEY, profile)
    }

    // --- workout history ---

    pub fn history(&self) -> Result<Vec<WorkoutLog>> {
        self.get_or(HISTORY_KEY, Vec::new)
    }

    /// Append a log to history. History is append-only: existing entries
    /// are never rewritten, only carried forward.
    pub fn append_log(&self, log: WorkoutLog) -> Result<()> {
        let mut history = self.history()?;
        history.push(log);
        self.set(HISTORY_KEY, &history)
    }

    // --- exercise catalog ---

    pub fn catalog(&self) -> Result<Vec<Exercise>> {
        self.get_or(CATALOG_KEY, exercises::seed)
    }

    // --- AI routine scratch state ---

    pub fn routine(&self) -> Result<Option<AiRoutine>> {
        self.get_or(ROUTINE_KEY, || None)
    }

    pub fn save_routine(&self, routine: &AiRoutine) -> Result<()> {
        self.set(ROUTINE_KEY, routine)
    }

    pub fn clear_routine(&self) -> Result<()> {
        self.delete(ROUTINE_KEY)
    }

    pub fn completed_keys(&self) -> Result<BTreeSet<CompletionKey>> {
        self.get_or(COMPLETED_KEY, BTreeSet::new)
    }

    pub fn save_completed_keys(&self, keys: &BTreeSet<CompletionKey>) -> Result<()> {
        self.set(COMPLETED_KEY, keys)
    }

    pub fn clear_completed_keys(&self) -> Result<()> {
        self.delete(COMPLETED_KEY)
    }

    // --- nutrition chat ---

    pub fn chat_history(&self) -> Result<Vec<ChatMessage>> {
        self.get_or(CHAT_KEY, Vec::new)
    }

    pub fn save_chat_history(&self, transcript: &[ChatMessage]) -> Result<()> {
        self.set(CHAT_KEY, &transcript)
    }
}
