use std::collections::HashSet;
use userdata_core::db::open_db_in_memory;
use userdata_core::{NewUser, SqliteUserRepository, User, UserService};

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    let alice = service
        .register_user("Alice", "alice@example.com")
        .unwrap();
    let bob = service
        .save_user(NewUser::new("Bob", "bob@example.com"))
        .unwrap();

    assert!(service.user_exists(alice.id).unwrap());
    assert_eq!(service.get_user(bob.id).unwrap(), Some(bob.clone()));
    assert_eq!(service.count_users().unwrap(), 2);

    let ids: HashSet<_> = service
        .list_users()
        .unwrap()
        .into_iter()
        .map(|user| user.id)
        .collect();
    assert_eq!(ids, HashSet::from([alice.id, bob.id]));
}

#[test]
fn service_upserts_and_removes_users() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    let alice = service
        .register_user("Alice", "alice@example.com")
        .unwrap();
    let renamed = User {
        name: "Alice Liddell".to_string(),
        ..alice.clone()
    };
    service.save_user(renamed.clone()).unwrap();
    assert_eq!(service.get_user(alice.id).unwrap(), Some(renamed));

    service.remove_user(alice.id).unwrap();
    service.remove_user(alice.id).unwrap();
    assert!(!service.user_exists(alice.id).unwrap());

    service.register_user("Bob", "bob@example.com").unwrap();
    service.remove_all_users().unwrap();
    assert!(service.list_users().unwrap().is_empty());
}

#[test]
fn service_releases_its_repository() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    service.register_user("Alice", "alice@example.com").unwrap();

    let repo = service.into_inner();
    let reopened = UserService::new(repo);
    assert_eq!(reopened.count_users().unwrap(), 1);
}
