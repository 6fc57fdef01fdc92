use super::Repository;
use crate::db::models::*;
use crate::errors::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

impl<C: ConnectionTrait> Repository<'_, C> {
    // ========================================================================
    // Setting Operations
    // ========================================================================

    /// Setting row for a journal, falling back to the press default
    pub async fn get_setting(
        &self,
        group_name: &str,
        name: &str,
        journal_id: Option<i32>,
    ) -> Result<Option<Setting>> {
        if let Some(journal_id) = journal_id {
            let journal_value = self.find_setting_row(group_name, name, Some(journal_id)).await?;
            if journal_value.is_some() {
                return Ok(journal_value);
            }
        }

        self.find_setting_row(group_name, name, None).await
    }

    /// Setting value for a journal, falling back to the press default
    pub async fn get_setting_value(
        &self,
        group_name: &str,
        name: &str,
        journal_id: Option<i32>,
    ) -> Result<Option<String>> {
        Ok(self
            .get_setting(group_name, name, journal_id)
            .await?
            .map(|s| s.value))
    }

    /// Write a value on exactly the given scope (journal or press default)
    pub async fn save_setting(
        &self,
        group_name: &str,
        name: &str,
        journal_id: Option<i32>,
        value: &str,
    ) -> Result<Setting> {
        match self.find_setting_row(group_name, name, journal_id).await? {
            Some(existing) => {
                let mut setting: SettingActiveModel = existing.into();
                setting.value = Set(value.to_string());
                setting.update(self.conn).await.map_err(Into::into)
            }
            None => SettingActiveModel {
                id: NotSet,
                group_name: Set(group_name.to_string()),
                name: Set(name.to_string()),
                journal_id: Set(journal_id),
                value: Set(value.to_string()),
            }
            .insert(self.conn)
            .await
            .map_err(Into::into),
        }
    }

    async fn find_setting_row(
        &self,
        group_name: &str,
        name: &str,
        journal_id: Option<i32>,
    ) -> Result<Option<Setting>> {
        let query = SettingEntity::find()
            .filter(SettingColumn::GroupName.eq(group_name))
            .filter(SettingColumn::Name.eq(name));

        let query = match journal_id {
            Some(id) => query.filter(SettingColumn::JournalId.eq(id)),
            None => query.filter(SettingColumn::JournalId.is_null()),
        };

        query.one(self.conn).await.map_err(Into::into)
    }
}
