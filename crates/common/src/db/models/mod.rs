//! SeaORM entity models
//!
//! Only the tables and columns of the platform schema that the scripts
//! read or write are modelled here.

pub mod journal;
pub mod setting;
pub mod account;
pub mod role;
pub mod account_role;
pub mod section;
pub mod licence;
pub mod issue_type;
pub mod issue;
pub mod issue_article;
pub mod article;
pub mod article_translation;
pub mod article_author;
pub mod keyword;
pub mod article_keyword;
pub mod publisher_note;
pub mod article_publisher_note;
pub mod frozen_author;
pub mod file;
pub mod article_file;
pub mod supplementary_file;
pub mod article_supplementary_file;
pub mod galley;
pub mod galley_image;
pub mod identifier;
pub mod review_assignment;
pub mod review_form_element;
pub mod review_answer;

pub use journal::{
    Entity as JournalEntity,
    Model as Journal,
    ActiveModel as JournalActiveModel,
    Column as JournalColumn,
};

pub use setting::{
    Entity as SettingEntity,
    Model as Setting,
    ActiveModel as SettingActiveModel,
    Column as SettingColumn,
};

pub use account::{
    Entity as AccountEntity,
    Model as Account,
    ActiveModel as AccountActiveModel,
    Column as AccountColumn,
};

pub use role::{
    Entity as RoleEntity,
    Model as Role,
    ActiveModel as RoleActiveModel,
    Column as RoleColumn,
};

pub use account_role::{
    Entity as AccountRoleEntity,
    Model as AccountRole,
    ActiveModel as AccountRoleActiveModel,
    Column as AccountRoleColumn,
};

pub use section::{
    Entity as SectionEntity,
    Model as Section,
    ActiveModel as SectionActiveModel,
    Column as SectionColumn,
};

pub use licence::{
    Entity as LicenceEntity,
    Model as Licence,
    ActiveModel as LicenceActiveModel,
    Column as LicenceColumn,
};

pub use issue_type::{
    Entity as IssueTypeEntity,
    Model as IssueType,
    ActiveModel as IssueTypeActiveModel,
    Column as IssueTypeColumn,
};

pub use issue::{
    Entity as IssueEntity,
    Model as Issue,
    ActiveModel as IssueActiveModel,
    Column as IssueColumn,
};

pub use issue_article::{
    Entity as IssueArticleEntity,
    Model as IssueArticle,
    ActiveModel as IssueArticleActiveModel,
    Column as IssueArticleColumn,
};

pub use article::{
    Entity as ArticleEntity,
    Model as Article,
    ActiveModel as ArticleActiveModel,
    Column as ArticleColumn,
    stage,
};

pub use article_translation::{
    Entity as ArticleTranslationEntity,
    Model as ArticleTranslation,
    ActiveModel as ArticleTranslationActiveModel,
    Column as ArticleTranslationColumn,
};

pub use article_author::{
    Entity as ArticleAuthorEntity,
    Model as ArticleAuthor,
    ActiveModel as ArticleAuthorActiveModel,
    Column as ArticleAuthorColumn,
};

pub use keyword::{
    Entity as KeywordEntity,
    Model as Keyword,
    ActiveModel as KeywordActiveModel,
    Column as KeywordColumn,
};

pub use article_keyword::{
    Entity as ArticleKeywordEntity,
    Model as ArticleKeyword,
    ActiveModel as ArticleKeywordActiveModel,
    Column as ArticleKeywordColumn,
};

pub use publisher_note::{
    Entity as PublisherNoteEntity,
    Model as PublisherNote,
    ActiveModel as PublisherNoteActiveModel,
    Column as PublisherNoteColumn,
};

pub use article_publisher_note::{
    Entity as ArticlePublisherNoteEntity,
    Model as ArticlePublisherNote,
    ActiveModel as ArticlePublisherNoteActiveModel,
    Column as ArticlePublisherNoteColumn,
};

pub use frozen_author::{
    Entity as FrozenAuthorEntity,
    Model as FrozenAuthor,
    ActiveModel as FrozenAuthorActiveModel,
    Column as FrozenAuthorColumn,
};

pub use file::{
    Entity as FileEntity,
    Model as File,
    ActiveModel as FileActiveModel,
    Column as FileColumn,
    XML_MIMETYPES,
};

pub use article_file::{
    Entity as ArticleFileEntity,
    Model as ArticleFile,
    ActiveModel as ArticleFileActiveModel,
    Column as ArticleFileColumn,
};

pub use supplementary_file::{
    Entity as SupplementaryFileEntity,
    Model as SupplementaryFile,
    ActiveModel as SupplementaryFileActiveModel,
    Column as SupplementaryFileColumn,
};

pub use article_supplementary_file::{
    Entity as ArticleSupplementaryFileEntity,
    Model as ArticleSupplementaryFile,
    ActiveModel as ArticleSupplementaryFileActiveModel,
    Column as ArticleSupplementaryFileColumn,
};

pub use galley::{
    Entity as GalleyEntity,
    Model as Galley,
    ActiveModel as GalleyActiveModel,
    Column as GalleyColumn,
};

pub use galley_image::{
    Entity as GalleyImageEntity,
    Model as GalleyImage,
    ActiveModel as GalleyImageActiveModel,
    Column as GalleyImageColumn,
};

pub use identifier::{
    Entity as IdentifierEntity,
    Model as Identifier,
    ActiveModel as IdentifierActiveModel,
    Column as IdentifierColumn,
    DOI, PUBID,
};

pub use review_assignment::{
    Entity as ReviewAssignmentEntity,
    Model as ReviewAssignment,
    ActiveModel as ReviewAssignmentActiveModel,
    Column as ReviewAssignmentColumn,
};

pub use review_form_element::{
    Entity as ReviewFormElementEntity,
    Model as ReviewFormElement,
    ActiveModel as ReviewFormElementActiveModel,
    Column as ReviewFormElementColumn,
};

pub use review_answer::{
    Entity as ReviewAnswerEntity,
    Model as ReviewAnswer,
    ActiveModel as ReviewAnswerActiveModel,
    Column as ReviewAnswerColumn,
};
