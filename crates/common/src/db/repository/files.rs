use super::Repository;
use crate::db::models::*;
use crate::errors::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};

/// Category of a plain article file link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleFileCategory {
    Manuscript,
    DataFigure,
    Source,
}

impl ArticleFileCategory {
    pub const ALL: [ArticleFileCategory; 3] = [
        ArticleFileCategory::Manuscript,
        ArticleFileCategory::DataFigure,
        ArticleFileCategory::Source,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleFileCategory::Manuscript => "manuscript",
            ArticleFileCategory::DataFigure => "data_figure",
            ArticleFileCategory::Source => "source",
        }
    }
}

impl<C: ConnectionTrait> Repository<'_, C> {
    // ========================================================================
    // File Operations
    // ========================================================================

    /// Find file by ID
    pub async fn find_file(&self, id: i32) -> Result<Option<File>> {
        FileEntity::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Insert a fresh record for `file` owned by `article_id`; the stored
    /// filename is kept so the payload path only differs by article
    pub async fn clone_file(&self, file: &File, article_id: i32) -> Result<File> {
        FileActiveModel {
            id: NotSet,
            article_id: Set(Some(article_id)),
            mime_type: Set(file.mime_type.clone()),
            original_filename: Set(file.original_filename.clone()),
            uuid_filename: Set(file.uuid_filename.clone()),
            label: Set(file.label.clone()),
            description: Set(file.description.clone()),
            date_uploaded: Set(file.date_uploaded),
            is_galley: Set(file.is_galley),
        }
        .insert(self.conn)
        .await
        .map_err(Into::into)
    }

    /// Files linked to an article under one category, in link order
    pub async fn article_files(
        &self,
        article_id: i32,
        category: ArticleFileCategory,
    ) -> Result<Vec<File>> {
        let links = ArticleFileEntity::find()
            .filter(ArticleFileColumn::ArticleId.eq(article_id))
            .filter(ArticleFileColumn::Category.eq(category.as_str()))
            .order_by_asc(ArticleFileColumn::Id)
            .all(self.conn)
            .await?;

        let mut files = Vec::with_capacity(links.len());
        for link in links {
            if let Some(file) = self.find_file(link.file_id).await? {
                files.push(file);
            }
        }

        Ok(files)
    }

    pub async fn add_article_file(
        &self,
        article_id: i32,
        file_id: i32,
        category: ArticleFileCategory,
    ) -> Result<()> {
        ArticleFileActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            file_id: Set(file_id),
            category: Set(category.as_str().to_string()),
        }
        .insert(self.conn)
        .await?;

        Ok(())
    }

    // ========================================================================
    // Supplementary Files
    // ========================================================================

    pub async fn supplementary_files(&self, article_id: i32) -> Result<Vec<SupplementaryFile>> {
        let ids: Vec<i32> = ArticleSupplementaryFileEntity::find()
            .filter(ArticleSupplementaryFileColumn::ArticleId.eq(article_id))
            .order_by_asc(ArticleSupplementaryFileColumn::Id)
            .all(self.conn)
            .await?
            .into_iter()
            .map(|m| m.supplementary_file_id)
            .collect();

        SupplementaryFileEntity::find()
            .filter(SupplementaryFileColumn::Id.is_in(ids))
            .order_by_asc(SupplementaryFileColumn::Id)
            .all(self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn insert_supplementary_file(
        &self,
        file_id: i32,
        description: &str,
    ) -> Result<SupplementaryFile> {
        SupplementaryFileActiveModel {
            id: NotSet,
            file_id: Set(file_id),
            description: Set(description.to_string()),
        }
        .insert(self.conn)
        .await
        .map_err(Into::into)
    }

    pub async fn add_article_supplementary_file(
        &self,
        article_id: i32,
        supplementary_file_id: i32,
    ) -> Result<()> {
        ArticleSupplementaryFileActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            supplementary_file_id: Set(supplementary_file_id),
        }
        .insert(self.conn)
        .await?;

        Ok(())
    }

    // ========================================================================
    // Galleys
    // ========================================================================

    pub async fn list_galleys(&self, article_id: i32) -> Result<Vec<Galley>> {
        GalleyEntity::find()
            .filter(GalleyColumn::ArticleId.eq(article_id))
            .order_by_asc(GalleyColumn::Sequence)
            .order_by_asc(GalleyColumn::Id)
            .all(self.conn)
            .await
            .map_err(Into::into)
    }

    /// Insert a copy of `galley` for `article_id` with the given owned files;
    /// the shared xsl reference is carried over unchanged
    pub async fn clone_galley(
        &self,
        galley: &Galley,
        article_id: i32,
        file_id: Option<i32>,
        css_file_id: Option<i32>,
    ) -> Result<Galley> {
        GalleyActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            file_id: Set(file_id),
            css_file_id: Set(css_file_id),
            xsl_file_id: Set(galley.xsl_file_id),
            label: Set(galley.label.clone()),
            kind: Set(galley.kind.clone()),
            sequence: Set(galley.sequence),
            public: Set(galley.public),
        }
        .insert(self.conn)
        .await
        .map_err(Into::into)
    }

    /// Embedded image files of a galley
    pub async fn galley_images(&self, galley_id: i32) -> Result<Vec<File>> {
        let ids: Vec<i32> = GalleyImageEntity::find()
            .filter(GalleyImageColumn::GalleyId.eq(galley_id))
            .order_by_asc(GalleyImageColumn::Id)
            .all(self.conn)
            .await?
            .into_iter()
            .map(|m| m.file_id)
            .collect();

        FileEntity::find()
            .filter(FileColumn::Id.is_in(ids))
            .order_by_asc(FileColumn::Id)
            .all(self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn add_galley_image(&self, galley_id: i32, file_id: i32) -> Result<()> {
        GalleyImageActiveModel {
            id: NotSet,
            galley_id: Set(galley_id),
            file_id: Set(file_id),
        }
        .insert(self.conn)
        .await?;

        Ok(())
    }

    /// First galley whose file is JATS XML, with that file
    pub async fn first_xml_galley(&self, article_id: i32) -> Result<Option<(Galley, File)>> {
        for galley in self.list_galleys(article_id).await? {
            let Some(file_id) = galley.file_id else {
                continue;
            };
            if let Some(file) = self.find_file(file_id).await? {
                if file.is_xml() {
                    return Ok(Some((galley, file)));
                }
            }
        }

        Ok(None)
    }

    /// Delete every file record owned by an article together with the links,
    /// supplementary wrappers and galleys that point at them. Rows owned by
    /// other articles are never touched. Returns the number of file rows
    /// deleted.
    pub async fn purge_owned_files(&self, article_id: i32) -> Result<u64> {
        ArticleFileEntity::delete_many()
            .filter(ArticleFileColumn::ArticleId.eq(article_id))
            .exec(self.conn)
            .await?;

        let supplementary_ids: Vec<i32> = ArticleSupplementaryFileEntity::find()
            .filter(ArticleSupplementaryFileColumn::ArticleId.eq(article_id))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|m| m.supplementary_file_id)
            .collect();
        ArticleSupplementaryFileEntity::delete_many()
            .filter(ArticleSupplementaryFileColumn::ArticleId.eq(article_id))
            .exec(self.conn)
            .await?;
        SupplementaryFileEntity::delete_many()
            .filter(SupplementaryFileColumn::Id.is_in(supplementary_ids))
            .exec(self.conn)
            .await?;

        let galley_ids: Vec<i32> = self
            .list_galleys(article_id)
            .await?
            .into_iter()
            .map(|g| g.id)
            .collect();
        GalleyImageEntity::delete_many()
            .filter(GalleyImageColumn::GalleyId.is_in(galley_ids))
            .exec(self.conn)
            .await?;
        GalleyEntity::delete_many()
            .filter(GalleyColumn::ArticleId.eq(article_id))
            .exec(self.conn)
            .await?;

        let result = FileEntity::delete_many()
            .filter(FileColumn::ArticleId.eq(article_id))
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected)
    }
}
