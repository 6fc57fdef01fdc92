use super::Repository;
use crate::db::models::*;
use crate::errors::{AppError, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use tracing::debug;
use uuid::Uuid;

/// Fields for a new account
#[derive(Debug, Clone)]
pub struct NewAccount<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub is_active: bool,
}

impl<C: ConnectionTrait> Repository<'_, C> {
    // ========================================================================
    // Account Operations
    // ========================================================================

    pub async fn find_account(&self, id: i32) -> Result<Option<Account>> {
        AccountEntity::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Account whose email is `email`, else whose username is `email`
    pub async fn find_account_by_email_or_username(&self, email: &str) -> Result<Option<Account>> {
        let by_email = AccountEntity::find()
            .filter(AccountColumn::Email.eq(email))
            .one(self.conn)
            .await?;

        if by_email.is_some() {
            return Ok(by_email);
        }

        AccountEntity::find()
            .filter(AccountColumn::Username.eq(email))
            .one(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Account keyed by email. A unique-constraint collision on insert (for
    /// example a username already taken by another account) falls back to
    /// looking the account up by email, then by username = email.
    pub async fn get_or_create_account(&self, new: NewAccount<'_>) -> Result<(Account, bool)> {
        let existing = AccountEntity::find()
            .filter(AccountColumn::Email.eq(new.email))
            .one(self.conn)
            .await?;

        if let Some(account) = existing {
            return Ok((account, false));
        }

        let inserted = AccountActiveModel {
            id: NotSet,
            email: Set(new.email.to_string()),
            username: Set(new.username.to_string()),
            first_name: Set(new.first_name.to_string()),
            last_name: Set(new.last_name.to_string()),
            is_active: Set(new.is_active),
            date_joined: Set(chrono::Utc::now().into()),
            uuid: Set(Uuid::new_v4()),
        }
        .insert(self.conn)
        .await;

        match inserted {
            Ok(account) => Ok((account, true)),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!(email = new.email, "Account insert collided, looking up existing");
                match self.find_account_by_email_or_username(new.email).await? {
                    Some(account) => Ok((account, false)),
                    None => Err(AppError::Duplicate {
                        message: format!("no account matches {} after a unique collision", new.email),
                    }),
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn activate_account(&self, account: Account) -> Result<Account> {
        let mut account: AccountActiveModel = account.into();
        account.is_active = Set(true);
        account.update(self.conn).await.map_err(Into::into)
    }

    // ========================================================================
    // Role Operations
    // ========================================================================

    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        RoleEntity::find()
            .order_by_asc(RoleColumn::Id)
            .all(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Role grant keyed by `(account, journal, role)`
    pub async fn get_or_create_account_role(
        &self,
        account_id: i32,
        journal_id: i32,
        role_id: i32,
    ) -> Result<(AccountRole, bool)> {
        let existing = AccountRoleEntity::find()
            .filter(AccountRoleColumn::AccountId.eq(account_id))
            .filter(AccountRoleColumn::JournalId.eq(journal_id))
            .filter(AccountRoleColumn::RoleId.eq(role_id))
            .one(self.conn)
            .await?;

        if let Some(grant) = existing {
            return Ok((grant, false));
        }

        let grant = AccountRoleActiveModel {
            id: NotSet,
            account_id: Set(account_id),
            journal_id: Set(journal_id),
            role_id: Set(role_id),
        }
        .insert(self.conn)
        .await?;

        Ok((grant, true))
    }
}
