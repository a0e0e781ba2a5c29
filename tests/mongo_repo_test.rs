//! Runs against a live MongoDB at MONGO_URI: `cargo test -- --ignored`.

use bson::oid::ObjectId;
use dotenv::dotenv;
use quicktutor_backend::config::MongoConfig;
use quicktutor_backend::model::course::{Course, CourseChanges};
use quicktutor_backend::model::user::{Role, User};
use quicktutor_backend::repository::course_repo::{CourseRepository, MongoCourseRepository};
use quicktutor_backend::repository::mongo;
use quicktutor_backend::repository::repository_error::RepositoryError;
use quicktutor_backend::repository::user_repo::{MongoUserRepository, UserRepository};

async fn test_db() -> mongodb::Database {
    let _ = dotenv();
    let config = MongoConfig::from_test_env();
    mongo::connect(&config).await.expect("connect to test MongoDB")
}

fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, ObjectId::new().to_hex())
}

#[tokio::test]
#[ignore]
async fn test_mongo_user_unique_indexes() {
    let db = test_db().await;
    let collection = unique("users");
    let repo = MongoUserRepository::new(&db, &collection).await.unwrap();

    let user = User {
        id: None,
        username: None,
        name: "A".to_string(),
        email: Some("a@x.com".to_string()),
        password_hash: "hash".to_string(),
        role: Role::User,
        created_at: None,
    };
    let inserted = repo.insert(user.clone()).await.unwrap();
    assert!(inserted.id.is_some());

    // No username on either document; the sparse index must not collide.
    let other = User { email: Some("b@x.com".to_string()), ..user.clone() };
    repo.insert(other).await.unwrap();

    let dup = repo.insert(user).await;
    assert!(matches!(dup, Err(RepositoryError::AlreadyExists(_))));

    let found = repo.find_by_identity(Some("a@x.com"), None).await.unwrap();
    assert_eq!(found.unwrap().id, inserted.id);

    db.collection::<User>(&collection).drop(None).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_mongo_course_crud_and_order() {
    let db = test_db().await;
    let collection = unique("courses");
    let repo = MongoCourseRepository::new(&db, &collection);

    let mut ids = Vec::new();
    for title in ["First", "Second", "Third"] {
        let course = Course { title: title.to_string(), ..Course::default() };
        ids.push(repo.create(course).await.unwrap().id.unwrap());
    }
    let titles: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.title).collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);

    let changes = CourseChanges { price: Some("₹999".to_string()), ..CourseChanges::default() };
    let updated = repo.update(ids[0], changes).await.unwrap().unwrap();
    assert_eq!(updated.price, "₹999");
    assert_eq!(updated.title, "First");
    assert!(repo.update(ObjectId::new(), CourseChanges::default()).await.unwrap().is_none());

    assert!(repo.delete(ids[1]).await.unwrap());
    assert!(!repo.delete(ids[1]).await.unwrap());
    assert_eq!(repo.count().await.unwrap(), 2);

    db.collection::<Course>(&collection).drop(None).await.unwrap();
}
