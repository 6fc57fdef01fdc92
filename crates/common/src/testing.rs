//! In-memory database and fixture builders for tests
//!
//! Enabled for this crate's own tests and, through the `test-utils`
//! feature, for the other workspace crates' dev-dependencies.

use crate::db::models::*;
use crate::db::DbPool;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr,
    EntityTrait, NotSet, PaginatorTrait, Schema, Set,
};

/// Fresh SQLite in-memory database with every modelled table created
pub async fn memory_pool() -> DbPool {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    // One connection: every pooled connection would otherwise get its own
    // empty in-memory database
    opts.max_connections(1).min_connections(1).sqlx_logging(false);

    let conn = Database::connect(opts)
        .await
        .expect("in-memory sqlite should open");
    create_schema(&conn).await.expect("schema should build");
    DbPool::from_connection(conn)
}

/// Create the modelled tables from the entity definitions
pub async fn create_schema(conn: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);

    macro_rules! create_tables {
        ($($entity:expr),+ $(,)?) => {
            $(
                conn.execute(backend.build(&schema.create_table_from_entity($entity)))
                    .await?;
            )+
        };
    }

    create_tables!(
        JournalEntity,
        SettingEntity,
        AccountEntity,
        RoleEntity,
        AccountRoleEntity,
        SectionEntity,
        LicenceEntity,
        IssueTypeEntity,
        IssueEntity,
        IssueArticleEntity,
        ArticleEntity,
        ArticleTranslationEntity,
        ArticleAuthorEntity,
        KeywordEntity,
        ArticleKeywordEntity,
        PublisherNoteEntity,
        ArticlePublisherNoteEntity,
        FrozenAuthorEntity,
        FileEntity,
        ArticleFileEntity,
        SupplementaryFileEntity,
        ArticleSupplementaryFileEntity,
        GalleyEntity,
        GalleyImageEntity,
        IdentifierEntity,
        ReviewAssignmentEntity,
        ReviewFormElementEntity,
        ReviewAnswerEntity,
    );

    Ok(())
}

/// Row count of any entity's table
pub async fn count<E>(conn: &DatabaseConnection, _entity: E) -> u64
where
    E: EntityTrait,
    E::Model: Sync,
{
    E::find().count(conn).await.expect("count query")
}

/// Fixture builders; every method inserts and returns the stored row
pub struct Seed<'c> {
    conn: &'c DatabaseConnection,
}

impl<'c> Seed<'c> {
    pub fn new(pool: &'c DbPool) -> Self {
        Self {
            conn: pool.connection(),
        }
    }

    pub async fn journal(&self, code: &str) -> Journal {
        JournalActiveModel {
            id: NotSet,
            code: Set(code.to_string()),
            name: Set(format!("Journal {}", code)),
            domain: Set(None),
            default_language: Set("en".to_string()),
        }
        .insert(self.conn)
        .await
        .expect("insert journal")
    }

    pub async fn article(&self, journal_id: i32, title: &str) -> Article {
        self.article_with(journal_id, title, |_| {}).await
    }

    /// Insert an article after letting `customise` adjust the defaults
    pub async fn article_with<F>(&self, journal_id: i32, title: &str, customise: F) -> Article
    where
        F: FnOnce(&mut ArticleActiveModel),
    {
        let mut article = ArticleActiveModel {
            id: NotSet,
            journal_id: Set(journal_id),
            title: Set(title.to_string()),
            subtitle: Set(None),
            abstract_text: Set(Some(format!("Abstract of {}", title))),
            language: Set(Some("eng".to_string())),
            stage: Set(stage::PUBLISHED.to_string()),
            is_import: Set(false),
            date_submitted: Set(Some(Utc::now().into())),
            date_accepted: Set(None),
            date_published: Set(None),
            date_declined: Set(None),
            page_numbers: Set(Some("1-10".to_string())),
            first_page: Set(Some(1)),
            last_page: Set(Some(10)),
            total_pages: Set(Some(10)),
            article_number: Set(None),
            peer_reviewed: Set(true),
            is_remote: Set(false),
            remote_url: Set(None),
            competing_interests: Set(None),
            custom_how_to_cite: Set(None),
            section_id: Set(None),
            license_id: Set(None),
            primary_issue_id: Set(None),
            large_image_file_id: Set(None),
            thumbnail_image_file_id: Set(None),
        };
        customise(&mut article);
        article.insert(self.conn).await.expect("insert article")
    }

    pub async fn translation(&self, article_id: i32, language: &str, title: &str) -> ArticleTranslation {
        ArticleTranslationActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            language: Set(language.to_string()),
            title: Set(title.to_string()),
            abstract_text: Set(None),
        }
        .insert(self.conn)
        .await
        .expect("insert translation")
    }

    pub async fn section(&self, journal_id: i32, name: &str) -> Section {
        SectionActiveModel {
            id: NotSet,
            journal_id: Set(journal_id),
            name: Set(name.to_string()),
            sequence: Set(3),
        }
        .insert(self.conn)
        .await
        .expect("insert section")
    }

    pub async fn licence(&self, journal_id: i32, short_name: &str) -> Licence {
        LicenceActiveModel {
            id: NotSet,
            journal_id: Set(journal_id),
            short_name: Set(short_name.to_string()),
            name: Set(format!("Licence {}", short_name)),
            url: Set(format!("https://licences.example/{}", short_name)),
        }
        .insert(self.conn)
        .await
        .expect("insert licence")
    }

    pub async fn issue_type(&self, journal_id: i32, code: &str) -> IssueType {
        IssueTypeActiveModel {
            id: NotSet,
            journal_id: Set(journal_id),
            code: Set(code.to_string()),
            pretty_name: Set(code.to_string()),
            custom_plural: Set(None),
        }
        .insert(self.conn)
        .await
        .expect("insert issue type")
    }

    pub async fn issue(&self, journal_id: i32, issue_type_id: i32, volume: i32, number: &str) -> Issue {
        IssueActiveModel {
            id: NotSet,
            journal_id: Set(journal_id),
            volume: Set(volume),
            issue: Set(number.to_string()),
            issue_type_id: Set(issue_type_id),
            date: Set(Some(Utc::now().into())),
            issue_title: Set(format!("Volume {} Issue {}", volume, number)),
        }
        .insert(self.conn)
        .await
        .expect("insert issue")
    }

    pub async fn issue_member(&self, issue_id: i32, article_id: i32) {
        IssueArticleActiveModel {
            id: NotSet,
            issue_id: Set(issue_id),
            article_id: Set(article_id),
        }
        .insert(self.conn)
        .await
        .expect("insert issue membership");
    }

    pub async fn account(&self, email: &str) -> Account {
        AccountActiveModel {
            id: NotSet,
            email: Set(email.to_string()),
            username: Set(email.to_string()),
            first_name: Set("Ada".to_string()),
            last_name: Set("Reviewer".to_string()),
            is_active: Set(true),
            date_joined: Set(Utc::now().into()),
            uuid: Set(uuid::Uuid::new_v4()),
        }
        .insert(self.conn)
        .await
        .expect("insert account")
    }

    pub async fn author(&self, article_id: i32, account_id: i32) {
        ArticleAuthorActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            account_id: Set(account_id),
        }
        .insert(self.conn)
        .await
        .expect("insert article author");
    }

    pub async fn keyword(&self, article_id: i32, word: &str) -> Keyword {
        let keyword = KeywordActiveModel {
            id: NotSet,
            word: Set(word.to_string()),
        }
        .insert(self.conn)
        .await
        .expect("insert keyword");
        ArticleKeywordActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            keyword_id: Set(keyword.id),
        }
        .insert(self.conn)
        .await
        .expect("insert article keyword");
        keyword
    }

    pub async fn publisher_note(&self, article_id: i32, text: &str) -> PublisherNote {
        let note = PublisherNoteActiveModel {
            id: NotSet,
            text: Set(text.to_string()),
            sequence: Set(0),
        }
        .insert(self.conn)
        .await
        .expect("insert publisher note");
        ArticlePublisherNoteActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            publisher_note_id: Set(note.id),
        }
        .insert(self.conn)
        .await
        .expect("insert article publisher note");
        note
    }

    pub async fn frozen_author(&self, article_id: i32, last_name: &str, order: i32) -> FrozenAuthor {
        FrozenAuthorActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            author_id: Set(None),
            first_name: Set("Frozen".to_string()),
            middle_name: Set(None),
            last_name: Set(last_name.to_string()),
            institution: Set("Birkbeck".to_string()),
            department: Set(None),
            frozen_email: Set(None),
            order: Set(order),
        }
        .insert(self.conn)
        .await
        .expect("insert frozen author")
    }

    /// File record bound to `article_id` (no payload is written)
    pub async fn file(&self, article_id: Option<i32>, uuid_filename: &str, mime_type: &str) -> File {
        FileActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            mime_type: Set(mime_type.to_string()),
            original_filename: Set(format!("original-{}", uuid_filename)),
            uuid_filename: Set(uuid_filename.to_string()),
            label: Set(None),
            description: Set(None),
            date_uploaded: Set(Utc::now().into()),
            is_galley: Set(false),
        }
        .insert(self.conn)
        .await
        .expect("insert file")
    }

    pub async fn article_file(&self, article_id: i32, file_id: i32, category: &str) {
        ArticleFileActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            file_id: Set(file_id),
            category: Set(category.to_string()),
        }
        .insert(self.conn)
        .await
        .expect("insert article file");
    }

    pub async fn supplementary_file(&self, article_id: i32, file_id: i32, description: &str) -> SupplementaryFile {
        let wrapper = SupplementaryFileActiveModel {
            id: NotSet,
            file_id: Set(file_id),
            description: Set(description.to_string()),
        }
        .insert(self.conn)
        .await
        .expect("insert supplementary file");
        ArticleSupplementaryFileActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            supplementary_file_id: Set(wrapper.id),
        }
        .insert(self.conn)
        .await
        .expect("insert article supplementary file");
        wrapper
    }

    pub async fn galley(
        &self,
        article_id: i32,
        label: &str,
        file_id: Option<i32>,
        css_file_id: Option<i32>,
        xsl_file_id: Option<i32>,
    ) -> Galley {
        GalleyActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            file_id: Set(file_id),
            css_file_id: Set(css_file_id),
            xsl_file_id: Set(xsl_file_id),
            label: Set(label.to_string()),
            kind: Set(label.to_lowercase()),
            sequence: Set(0),
            public: Set(true),
        }
        .insert(self.conn)
        .await
        .expect("insert galley")
    }

    pub async fn galley_image(&self, galley_id: i32, file_id: i32) {
        GalleyImageActiveModel {
            id: NotSet,
            galley_id: Set(galley_id),
            file_id: Set(file_id),
        }
        .insert(self.conn)
        .await
        .expect("insert galley image");
    }

    pub async fn setting(&self, group_name: &str, name: &str, journal_id: Option<i32>, value: &str) -> Setting {
        SettingActiveModel {
            id: NotSet,
            group_name: Set(group_name.to_string()),
            name: Set(name.to_string()),
            journal_id: Set(journal_id),
            value: Set(value.to_string()),
        }
        .insert(self.conn)
        .await
        .expect("insert setting")
    }

    pub async fn role(&self, slug: &str, name: &str) -> Role {
        RoleActiveModel {
            id: NotSet,
            slug: Set(slug.to_string()),
            name: Set(name.to_string()),
        }
        .insert(self.conn)
        .await
        .expect("insert role")
    }

    pub async fn review_assignment(&self, article_id: i32, reviewer_id: i32, editor_id: Option<i32>) -> ReviewAssignment {
        ReviewAssignmentActiveModel {
            id: NotSet,
            article_id: Set(article_id),
            reviewer_id: Set(reviewer_id),
            editor_id: Set(editor_id),
            decision: Set(Some("accept".to_string())),
            date_requested: Set(Utc::now().into()),
            date_due: Set(None),
            date_accepted: Set(None),
            date_declined: Set(None),
            date_complete: Set(None),
            is_complete: Set(false),
            comments_for_editor: Set(None),
        }
        .insert(self.conn)
        .await
        .expect("insert review assignment")
    }

    pub async fn review_form_element(&self, name: &str) -> ReviewFormElement {
        ReviewFormElementActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        }
        .insert(self.conn)
        .await
        .expect("insert review form element")
    }

    pub async fn review_answer(
        &self,
        assignment_id: i32,
        element_id: Option<i32>,
        answer: &str,
        edited_answer: Option<&str>,
    ) -> ReviewAnswer {
        ReviewAnswerActiveModel {
            id: NotSet,
            assignment_id: Set(assignment_id),
            original_element_id: Set(element_id),
            answer: Set(answer.to_string()),
            edited_answer: Set(edited_answer.map(str::to_string)),
        }
        .insert(self.conn)
        .await
        .expect("insert review answer")
    }
}
