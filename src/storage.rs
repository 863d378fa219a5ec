use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    auth::{
        repo::UserRepo,
        repo_types::{NewUser, User},
    },
    error::{AppError, AppResult},
    expenses::{
        repo::ExpenseRepo,
        repo_types::{Expense, NewExpense},
    },
};

/// In-process storage backend for users and expenses.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>, // keyed by username
    expenses: RwLock<Vec<Expense>>,
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(AppError::DuplicateUsername);
        }
        let user = User::from(user);
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }
}

#[async_trait]
impl ExpenseRepo for MemoryStore {
    async fn insert(&self, expense: NewExpense) -> AppResult<Expense> {
        let expense = Expense::from(expense);
        self.expenses.write().await.push(expense.clone());
        Ok(expense)
    }

    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Expense>> {
        Ok(self
            .expenses
            .read()
            .await
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// Backend whose reads see nothing and whose writes always fail.
#[cfg(test)]
pub(crate) struct UnavailableStore;

#[cfg(test)]
#[async_trait]
impl UserRepo for UnavailableStore {
    async fn find_by_username(&self, _username: &str) -> AppResult<Option<User>> {
        Ok(None)
    }

    async fn create(&self, _user: NewUser) -> AppResult<User> {
        Err(AppError::StorageUnavailable(anyhow::anyhow!("connection refused")))
    }
}

#[cfg(test)]
#[async_trait]
impl ExpenseRepo for UnavailableStore {
    async fn insert(&self, _expense: NewExpense) -> AppResult<Expense> {
        Err(AppError::StorageUnavailable(anyhow::anyhow!("connection refused")))
    }

    async fn list_by_owner(&self, _user_id: Uuid) -> AppResult<Vec<Expense>> {
        Ok(Vec::new())
    }
}
