//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! healthtrack-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! UNIQUE・外部キー制約は [`SimulatedDbError`] で PostgreSQL と同じ SQLSTATE を返す。

use std::{
    borrow::Cow,
    fmt,
    sync::{
        Arc,
        Mutex,
        MutexGuard,
        atomic::{AtomicI64, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use healthtrack_domain::{
    entry::{MetricEntry, RECENT_ENTRY_LIMIT},
    user::{NewUser, User, UserId, UserPatch},
};

use crate::{
    error::InfraError,
    repository::{EntryRepository, UserRepository},
};

// ===== SimulatedDbError =====

/// PostgreSQL のエラー応答を模したエラー
///
/// `code` は SQLSTATE、`constraint` は違反した制約名。
#[derive(Debug, Clone)]
pub struct SimulatedDbError {
    code:       &'static str,
    constraint: Option<String>,
}

impl SimulatedDbError {
    pub fn new(code: &'static str, constraint: Option<&str>) -> Self {
        Self {
            code,
            constraint: constraint.map(str::to_string),
        }
    }

    pub fn unique_violation(constraint: &str) -> Self {
        Self::new("23505", Some(constraint))
    }

    pub fn foreign_key_violation(constraint: &str) -> Self {
        Self::new("23503", Some(constraint))
    }

    pub fn into_sqlx(self) -> sqlx::Error {
        sqlx::Error::Database(Box::new(self))
    }

    pub fn into_infra(self) -> InfraError {
        self.into_sqlx().into()
    }
}

impl fmt::Display for SimulatedDbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "simulated database error (SQLSTATE {})", self.code)
    }
}

impl std::error::Error for SimulatedDbError {}

impl sqlx::error::DatabaseError for SimulatedDbError {
    fn message(&self) -> &str {
        "simulated database error"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.code))
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        self.constraint.as_deref()
    }

    fn kind(&self) -> sqlx::error::ErrorKind {
        match self.code {
            "23505" => sqlx::error::ErrorKind::UniqueViolation,
            "23503" => sqlx::error::ErrorKind::ForeignKeyViolation,
            "23502" => sqlx::error::ErrorKind::NotNullViolation,
            "23514" => sqlx::error::ErrorKind::CheckViolation,
            _ => sqlx::error::ErrorKind::Other,
        }
    }
}

// ===== MockUserRepository =====

/// インメモリのユーザーリポジトリ
///
/// ID は 1 から採番し、削除しても再利用しない（IDENTITY 列と同じ）。
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users:   Arc<Mutex<Vec<User>>>,
    last_id: Arc<AtomicI64>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, id: UserId) -> bool {
        self.users.lock().unwrap().iter().any(|u| u.id() == id)
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn check_unique(
        users: &[User],
        except: Option<UserId>,
        name: &str,
        email: &str,
    ) -> Result<(), InfraError> {
        let others = users.iter().filter(|u| Some(u.id()) != except);
        for user in others {
            if user.name() == name {
                return Err(SimulatedDbError::unique_violation("users_name_key").into_infra());
            }
            if user.email() == email {
                return Err(SimulatedDbError::unique_violation("users_email_key").into_infra());
            }
        }
        Ok(())
    }
}

/// `UPDATE ... SET col = COALESCE($n, col)` と同じ規則で部分更新する
fn apply_patch(user: &User, patch: &UserPatch) -> User {
    User::from_db(
        user.id(),
        patch.name.clone().unwrap_or_else(|| user.name().to_string()),
        patch.age.unwrap_or(user.age()),
        patch.height.unwrap_or(user.height()),
        patch.sex.clone().unwrap_or_else(|| user.sex().to_string()),
        patch.email.clone().unwrap_or_else(|| user.email().to_string()),
        user.created_at(),
    )
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn insert(&self, new_user: &NewUser) -> Result<User, InfraError> {
        let mut users = self.users.lock().unwrap();
        Self::check_unique(&users, None, &new_user.name, &new_user.email)?;

        let id = UserId::new(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
        let user = User::from_db(
            id,
            new_user.name.clone(),
            new_user.age,
            new_user.height,
            new_user.sex.clone(),
            new_user.email.clone(),
            Utc::now(),
        );
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id() == id)
            .cloned())
    }

    async fn find_by_name_or_email(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Option<User>, InfraError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.name() == name || u.email() == email)
            .cloned())
    }

    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<Option<User>, InfraError> {
        let mut users = self.users.lock().unwrap();
        let Some(index) = users.iter().position(|u| u.id() == id) else {
            return Ok(None);
        };

        let updated = apply_patch(&users[index], patch);
        Self::check_unique(&users, Some(id), updated.name(), updated.email())?;
        users[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, InfraError> {
        let mut users = self.users.lock().unwrap();
        let removed = users
            .iter()
            .position(|u| u.id() == id)
            .map(|index| users.remove(index));
        Ok(removed)
    }
}

// ===== MockEntryRepository =====

/// インメモリのエントリーリポジトリ
///
/// [`with_users`](Self::with_users) で作成すると、存在しないユーザーへの書き込みは
/// 外部キー制約違反になり、削除済みユーザーのエントリーは読み書きの前に取り除かれる
/// （`ON DELETE CASCADE` 相当）。
#[derive(Clone)]
pub struct MockEntryRepository<E> {
    entries: Arc<Mutex<Vec<E>>>,
    users:   Option<MockUserRepository>,
    failure: Arc<Mutex<Option<SimulatedDbError>>>,
}

impl<E: MetricEntry> Default for MockEntryRepository<E> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            users:   None,
            failure: Arc::new(Mutex::new(None)),
        }
    }
}

impl<E: MetricEntry> MockEntryRepository<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: MockUserRepository) -> Self {
        Self {
            users: Some(users),
            ..Self::default()
        }
    }

    pub fn add_entry(&self, entry: E) {
        self.entries.lock().unwrap().push(entry);
    }

    pub fn count(&self) -> usize {
        self.live_entries().len()
    }

    /// 次の書き込み（upsert / update）を指定したエラーで失敗させる
    pub fn fail_next_write(&self, error: SimulatedDbError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    fn check_write(&self, user_id: UserId) -> Result<(), InfraError> {
        if let Some(error) = self.failure.lock().unwrap().take() {
            return Err(error.into_infra());
        }
        match &self.users {
            Some(users) if !users.exists(user_id) => {
                let constraint = format!("{}_user_id_fkey", E::KIND.resource_name());
                Err(SimulatedDbError::foreign_key_violation(&constraint).into_infra())
            }
            _ => Ok(()),
        }
    }

    /// 削除済みユーザーのエントリーを取り除いた上でロックを返す
    fn live_entries(&self) -> MutexGuard<'_, Vec<E>> {
        let mut entries = self.entries.lock().unwrap();
        if let Some(users) = &self.users {
            entries.retain(|e| users.exists(e.user_id()));
        }
        entries
    }

    fn position(entries: &[E], user_id: UserId, entry_date: NaiveDate) -> Option<usize> {
        entries
            .iter()
            .position(|e| e.user_id() == user_id && e.entry_date() == entry_date)
    }
}

#[async_trait]
impl<E: MetricEntry> EntryRepository<E> for MockEntryRepository<E> {
    async fn upsert(&self, entry: &E) -> Result<E, InfraError> {
        self.check_write(entry.user_id())?;

        let mut entries = self.live_entries();
        match Self::position(&entries, entry.user_id(), entry.entry_date()) {
            Some(index) => entries[index] = entry.clone(),
            None => entries.push(entry.clone()),
        }
        Ok(entry.clone())
    }

    async fn find_recent(&self, user_id: UserId) -> Result<Vec<E>, InfraError> {
        let mut found: Vec<E> = self
            .live_entries()
            .iter()
            .filter(|e| e.user_id() == user_id)
            .cloned()
            .collect();
        found.sort_by_key(|e| std::cmp::Reverse(e.entry_date()));
        found.truncate(RECENT_ENTRY_LIMIT as usize);
        Ok(found)
    }

    async fn find_one(
        &self,
        user_id: UserId,
        entry_date: NaiveDate,
    ) -> Result<Option<E>, InfraError> {
        let entries = self.live_entries();
        Ok(Self::position(&entries, user_id, entry_date).map(|index| entries[index].clone()))
    }

    async fn update(&self, entry: &E) -> Result<Option<E>, InfraError> {
        if let Some(error) = self.failure.lock().unwrap().take() {
            return Err(error.into_infra());
        }

        let mut entries = self.live_entries();
        let Some(index) = Self::position(&entries, entry.user_id(), entry.entry_date()) else {
            return Ok(None);
        };
        entries[index] = entry.clone();
        Ok(Some(entry.clone()))
    }

    async fn delete(
        &self,
        user_id: UserId,
        entry_date: NaiveDate,
    ) -> Result<Option<E>, InfraError> {
        let mut entries = self.live_entries();
        Ok(Self::position(&entries, user_id, entry_date).map(|index| entries.remove(index)))
    }
}
