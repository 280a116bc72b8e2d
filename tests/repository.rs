use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use pushkind_common::repository::errors::RepositoryError;
use pushkind_cookbook::domain::article::{Article, NewArticle};
use pushkind_cookbook::domain::category::{CategoryUpdate, NewCategory};
use pushkind_cookbook::domain::comment::{Comment, NewComment};
use pushkind_cookbook::domain::publication::{ContentRef, NewPublication};
use pushkind_cookbook::domain::recipe::{NewRecipe, Recipe};
use pushkind_cookbook::domain::schedule::CalendarMonth;
use pushkind_cookbook::domain::subscriber::NewSubscriber;
use pushkind_cookbook::domain::types::{
    ArticleBody, AuthorName, CategoryId, CategoryName, CommentBody, CommentId, CommentStatus,
    ContentKind, ContentTitle, PublicationId, PublicationStatus, RecipeDescription,
    RecipeIngredients, RecipeInstructions, RejectionReason, Slug, SubscriberEmail,
};
use pushkind_cookbook::repository::{
    ArticleReader, ArticleWriter, CategoryReader, CategoryWriter, CommentListQuery, CommentReader,
    CommentWriter, ContentListQuery, DieselRepository, PublicationListQuery, PublicationReader,
    PublicationWriter, RecipeReader, RecipeWriter, SubscriberReader, SubscriberWriter,
};

mod common;

fn new_category(slug: &str, parent_id: Option<CategoryId>, order: i32) -> NewCategory {
    let now = Utc::now().naive_utc();
    NewCategory {
        name: CategoryName::new(slug.replace('-', " ")).expect("valid name"),
        slug: Slug::new(slug).expect("valid slug"),
        parent_id,
        sort_order: order,
        created_at: now,
        updated_at: now,
    }
}

fn create_category(
    repo: &DieselRepository,
    slug: &str,
    parent_id: Option<CategoryId>,
) -> CategoryId {
    repo.create_category(&new_category(slug, parent_id, 0))
        .expect("should create category");
    repo.get_category_by_slug(&Slug::new(slug).unwrap())
        .expect("should read category")
        .expect("category should exist")
        .id
}

fn create_article(
    repo: &DieselRepository,
    slug: &str,
    category_id: Option<CategoryId>,
) -> Article {
    let now = Utc::now().naive_utc();
    repo.create_article(&NewArticle {
        category_id,
        title: ContentTitle::new(format!("Title of {slug}")).unwrap(),
        slug: Slug::new(slug).unwrap(),
        author: AuthorName::new("Ann").unwrap(),
        body: ArticleBody::new("Body text").unwrap(),
        created_at: now,
        updated_at: now,
    })
    .expect("should create article")
}

fn create_recipe(repo: &DieselRepository, slug: &str) -> Recipe {
    let now = Utc::now().naive_utc();
    repo.create_recipe(&NewRecipe {
        category_id: None,
        title: ContentTitle::new("Pancakes").unwrap(),
        slug: Slug::new(slug).unwrap(),
        author: AuthorName::new("Bo").unwrap(),
        description: RecipeDescription::new("Fluffy").unwrap(),
        ingredients: RecipeIngredients::new("Flour, milk").unwrap(),
        instructions: RecipeInstructions::new("Mix and fry").unwrap(),
        created_at: now,
        updated_at: now,
    })
    .expect("should create recipe")
}

fn schedule(repo: &DieselRepository, content: ContentRef, date: NaiveDateTime) {
    let now = Utc::now().naive_utc();
    repo.create_publication(&NewPublication {
        content,
        publication_date: date,
        status: PublicationStatus::Scheduled,
        created_at: now,
        updated_at: now,
    })
    .expect("should create publication");
}

fn create_comment(repo: &DieselRepository, article: &Article) -> Comment {
    let now = Utc::now().naive_utc();
    repo.create_comment(&NewComment {
        article_id: article.id,
        parent_id: None,
        author_name: AuthorName::new("Sam").unwrap(),
        body: CommentBody::new("Too salty?").unwrap(),
        created_at: now,
        updated_at: now,
    })
    .expect("should create comment");
    let (_, comments) = repo
        .list_comments(CommentListQuery::default().article(article.id))
        .unwrap();
    comments.into_iter().last().expect("comment should exist")
}

fn first_publication(repo: &DieselRepository) -> PublicationId {
    repo.list_publications(PublicationListQuery::default())
        .unwrap()
        .remove(0)
        .id
}

fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

#[test]
fn categories_report_article_counts() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let basics = create_category(&repo, "basics", None);
    let sauces = create_category(&repo, "sauces", Some(basics));
    create_article(&repo, "stock", Some(basics));
    create_article(&repo, "roux", Some(basics));

    let categories = repo.list_categories().expect("should list categories");
    assert_eq!(categories.len(), 2);
    let basics_row = categories.iter().find(|c| c.id == basics).unwrap();
    let sauces_row = categories.iter().find(|c| c.id == sauces).unwrap();
    assert_eq!(basics_row.article_count.get(), 2);
    assert_eq!(sauces_row.article_count.get(), 0);
    assert_eq!(sauces_row.parent_id, Some(basics));
}

#[test]
fn duplicate_category_slug_is_rejected() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    create_category(&repo, "basics", None);
    let err = repo
        .create_category(&new_category("basics", None, 1))
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError(_)));
}

#[test]
fn update_category_overwrites_fields() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let basics = create_category(&repo, "basics", None);
    let desserts = create_category(&repo, "desserts", None);

    let affected = repo
        .update_category(
            desserts,
            &CategoryUpdate {
                name: CategoryName::new("Sweets").unwrap(),
                slug: Slug::new("sweets").unwrap(),
                parent_id: Some(basics),
                sort_order: 4,
            },
        )
        .expect("should update category");
    assert_eq!(affected, 1);

    let updated = repo
        .get_category_by_id(desserts)
        .expect("should read category")
        .expect("category should exist");
    assert_eq!(updated.slug.as_str(), "sweets");
    assert_eq!(updated.parent_id, Some(basics));
    assert_eq!(updated.sort_order, 4);
}

#[test]
fn delete_category_reparents_children_and_detaches_articles() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let root = create_category(&repo, "root", None);
    let middle = create_category(&repo, "middle", Some(root));
    let leaf = create_category(&repo, "leaf", Some(middle));
    let article = create_article(&repo, "filed", Some(middle));

    assert_eq!(repo.delete_category(middle).expect("should delete"), 1);

    let leaf_row = repo.get_category_by_id(leaf).unwrap().unwrap();
    assert_eq!(leaf_row.parent_id, Some(root));
    let article_row = repo.get_article_by_id(article.id).unwrap().unwrap();
    assert_eq!(article_row.category_id, None);
    assert!(repo.get_category_by_id(middle).unwrap().is_none());
}

#[test]
fn articles_paginate_and_filter_by_category() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let basics = create_category(&repo, "basics", None);
    for i in 0..3 {
        create_article(&repo, &format!("filed-{i}"), Some(basics));
    }
    create_article(&repo, "loose", None);

    let (total, page) = repo
        .list_articles(ContentListQuery::default().category(basics).paginate(1, 2))
        .expect("should list articles");
    assert_eq!(total, 3);
    assert_eq!(page.len(), 2);

    let (total, _) = repo
        .list_articles(ContentListQuery::default())
        .expect("should list articles");
    assert_eq!(total, 4);

    let found = repo
        .get_article_by_slug(&Slug::new("loose").unwrap())
        .unwrap()
        .expect("article should exist");
    assert_eq!(found.author.as_str(), "Ann");
}

#[test]
fn recipes_round_trip_through_storage() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = create_recipe(&repo, "pancakes");
    let loaded = repo
        .get_recipe_by_slug(&created.slug)
        .unwrap()
        .expect("recipe should exist");
    assert_eq!(loaded.id, created.id);
    assert_eq!(loaded.ingredients.as_str(), "Flour, milk");

    let (total, _) = repo.list_recipes(ContentListQuery::default()).unwrap();
    assert_eq!(total, 1);
}

#[test]
fn publications_resolve_content_and_respect_month() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let recipe = create_recipe(&repo, "pancakes");
    let article = create_article(&repo, "stock", None);
    schedule(&repo, ContentRef::Recipe(recipe.id), at(2024, 3, 15));
    schedule(&repo, ContentRef::Article(article.id), at(2024, 3, 1));
    schedule(&repo, ContentRef::Recipe(recipe.id), at(2024, 4, 1));

    let month = CalendarMonth::new(2024, 3).unwrap();
    let publications = repo
        .list_publications(PublicationListQuery::within(&month))
        .expect("should list publications");
    assert_eq!(publications.len(), 2);

    assert_eq!(publications[0].content.kind(), ContentKind::Article);
    assert_eq!(
        publications[0].summary.as_ref().unwrap().title.as_str(),
        "Title of stock"
    );
    assert_eq!(publications[1].content.kind(), ContentKind::Recipe);
    assert_eq!(
        publications[1].summary.as_ref().unwrap().author.as_str(),
        "Bo"
    );
}

#[test]
fn publication_status_changes_persist() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let recipe = create_recipe(&repo, "pancakes");
    schedule(&repo, ContentRef::Recipe(recipe.id), at(2024, 3, 15));
    let publication_id = first_publication(&repo);

    assert_eq!(repo.cancel_publication(publication_id).unwrap(), 1);
    let cancelled = repo.get_publication_by_id(publication_id).unwrap().unwrap();
    assert_eq!(cancelled.status, PublicationStatus::Cancelled);

    assert_eq!(
        repo.reschedule_publication(publication_id, at(2024, 5, 2))
            .unwrap(),
        1
    );
    let moved = repo.get_publication_by_id(publication_id).unwrap().unwrap();
    assert_eq!(moved.status, PublicationStatus::Scheduled);
    assert_eq!(moved.publication_date, at(2024, 5, 2));
}

#[test]
fn published_entries_ignore_cancel_and_reschedule() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let recipe = create_recipe(&repo, "pancakes");
    let due = Utc::now().naive_utc() - Duration::days(1);
    schedule(&repo, ContentRef::Recipe(recipe.id), due);
    let publication_id = first_publication(&repo);
    assert_eq!(
        repo.publish_due_publications(Utc::now().naive_utc())
            .unwrap(),
        1
    );

    assert_eq!(repo.cancel_publication(publication_id).unwrap(), 0);
    assert_eq!(
        repo.reschedule_publication(publication_id, at(2030, 1, 1))
            .unwrap(),
        0
    );

    let stored = repo.get_publication_by_id(publication_id).unwrap().unwrap();
    assert_eq!(stored.status, PublicationStatus::Published);
    assert_eq!(stored.publication_date, due);
}

#[test]
fn publish_due_marks_only_past_scheduled_entries() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let recipe = create_recipe(&repo, "pancakes");
    let now = Utc::now().naive_utc();
    schedule(&repo, ContentRef::Recipe(recipe.id), now - Duration::days(1));
    schedule(&repo, ContentRef::Recipe(recipe.id), now + Duration::days(1));

    assert_eq!(repo.publish_due_publications(now).unwrap(), 1);

    let upcoming = repo
        .list_publications(
            PublicationListQuery::default()
                .starting_at(now)
                .status(PublicationStatus::Scheduled)
                .limit(5),
        )
        .unwrap();
    assert_eq!(upcoming.len(), 1);

    let published = repo
        .list_publications(PublicationListQuery::default().status(PublicationStatus::Published))
        .unwrap();
    assert_eq!(published.len(), 1);
}

#[test]
fn comment_moderation_state_is_saved() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let article = create_article(&repo, "stock", None);
    let comment = create_comment(&repo, &article);
    assert_eq!(comment.status, CommentStatus::Pending);

    let reported = repo.report_comment(comment.id).unwrap().unwrap();
    assert_eq!(reported.report_count.get(), 1);
    assert_eq!(
        repo.reject_comment(comment.id, &RejectionReason::new("rude").unwrap())
            .unwrap(),
        1
    );

    let stored = repo.get_comment_by_id(comment.id).unwrap().unwrap();
    assert_eq!(stored.status, CommentStatus::Rejected);
    assert_eq!(stored.report_count.get(), 1);
    assert_eq!(stored.rejection_reason.unwrap().as_str(), "rude");

    let (pending, _) = repo
        .list_comments(CommentListQuery::default().status(CommentStatus::Pending))
        .unwrap();
    assert_eq!(pending, 0);
}

#[test]
fn third_report_flags_pending_comment() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let article = create_article(&repo, "stock", None);
    let comment = create_comment(&repo, &article);

    repo.report_comment(comment.id).unwrap();
    let second = repo.report_comment(comment.id).unwrap().unwrap();
    assert_eq!(second.status, CommentStatus::Pending);
    assert_eq!(second.report_count.get(), 2);

    let third = repo.report_comment(comment.id).unwrap().unwrap();
    assert_eq!(third.status, CommentStatus::Flagged);
    assert_eq!(third.report_count.get(), 3);
}

#[test]
fn reports_from_stale_copies_all_count() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let article = create_article(&repo, "stock", None);
    let comment = create_comment(&repo, &article);

    // Every reporter read the comment with zero reports before writing.
    for _ in 0..5 {
        assert_eq!(comment.report_count.get(), 0);
        repo.report_comment(comment.id).unwrap();
    }

    let stored = repo.get_comment_by_id(comment.id).unwrap().unwrap();
    assert_eq!(stored.report_count.get(), 5);
    assert_eq!(stored.status, CommentStatus::Flagged);
}

#[test]
fn report_after_approval_keeps_comment_approved() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let article = create_article(&repo, "stock", None);
    let comment = create_comment(&repo, &article);
    assert_eq!(repo.approve_comment(comment.id).unwrap(), 1);

    for _ in 0..3 {
        repo.report_comment(comment.id).unwrap();
    }

    let stored = repo.get_comment_by_id(comment.id).unwrap().unwrap();
    assert_eq!(stored.status, CommentStatus::Approved);
    assert_eq!(stored.report_count.get(), 3);
}

#[test]
fn moderated_comments_reject_second_decision() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let article = create_article(&repo, "stock", None);
    let approved = create_comment(&repo, &article);
    let rejected = create_comment(&repo, &article);
    let reason = RejectionReason::new("spam").unwrap();

    assert_eq!(repo.approve_comment(approved.id).unwrap(), 1);
    assert_eq!(repo.reject_comment(rejected.id, &reason).unwrap(), 1);

    assert_eq!(repo.reject_comment(approved.id, &reason).unwrap(), 0);
    assert_eq!(repo.approve_comment(rejected.id).unwrap(), 0);

    let approved = repo.get_comment_by_id(approved.id).unwrap().unwrap();
    assert_eq!(approved.status, CommentStatus::Approved);
    assert!(approved.rejection_reason.is_none());
    let rejected = repo.get_comment_by_id(rejected.id).unwrap().unwrap();
    assert_eq!(rejected.status, CommentStatus::Rejected);
    assert_eq!(rejected.rejection_reason.unwrap().as_str(), "spam");
}

#[test]
fn reporting_missing_comment_returns_none() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let missing = CommentId::new(42).unwrap();
    assert!(repo.report_comment(missing).unwrap().is_none());
    assert_eq!(repo.approve_comment(missing).unwrap(), 0);
}

#[test]
fn subscribers_toggle_active_flag() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let email = SubscriberEmail::new("Cook@Example.com").unwrap();
    let now = Utc::now().naive_utc();
    let subscriber = NewSubscriber {
        email: email.clone(),
        created_at: now,
        updated_at: now,
    };
    repo.upsert_subscriber(&subscriber)
        .expect("should create subscriber");

    assert_eq!(repo.set_subscriber_active(&email, false).unwrap(), 1);
    assert!(repo.list_subscribers(true).unwrap().is_empty());
    assert_eq!(repo.list_subscribers(false).unwrap().len(), 1);

    let stored = repo.get_subscriber_by_email(&email).unwrap().unwrap();
    assert_eq!(stored.email.as_str(), "cook@example.com");
    assert!(!stored.active);
}

#[test]
fn upsert_reactivates_without_duplicating() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let email = SubscriberEmail::new("cook@example.com").unwrap();
    let now = Utc::now().naive_utc();
    let subscriber = NewSubscriber {
        email: email.clone(),
        created_at: now,
        updated_at: now,
    };
    repo.upsert_subscriber(&subscriber).unwrap();
    repo.upsert_subscriber(&subscriber)
        .expect("repeated subscribe should succeed");
    assert_eq!(repo.list_subscribers(false).unwrap().len(), 1);

    repo.set_subscriber_active(&email, false).unwrap();
    repo.upsert_subscriber(&subscriber)
        .expect("inactive address should be reactivated");

    let all = repo.list_subscribers(false).unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].active);
}
