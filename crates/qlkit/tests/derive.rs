#![cfg(feature = "derive")]
#![allow(dead_code)]

mod common;

use common::MockConn;
use qlkit::prelude::*;
use qlkit::ExecResult;

#[derive(Debug, FromRow, Record)]
struct User {
    id: i64,
    name: String,
    #[orm(column = "email_address")]
    email: Option<String>,
    #[orm(default)]
    nickname: String,
    #[orm(skip)]
    cached: Vec<u8>,
}

#[derive(Debug, FromRow, Record)]
#[orm(rename_all = "camelCase")]
struct Account {
    #[orm(id)]
    account_no: Option<u64>,
    display_name: String,
    is_active: bool,
}

#[test]
fn from_row_maps_columns() {
    let row = Row::from_pairs([
        ("id", Value::from(7)),
        ("name", Value::from("ann")),
        ("email_address", Value::Null),
    ]);
    let user = User::from_row(&row).unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.name, "ann");
    assert_eq!(user.email, None);
    assert_eq!(user.nickname, "");
    assert!(user.cached.is_empty());
}

#[test]
fn from_row_requires_columns_without_default() {
    let row = Row::from_pairs([("id", Value::from(7))]);
    let err = User::from_row(&row).unwrap_err();
    assert!(matches!(err, QlError::Decode { ref column, .. } if column == "name"));
}

#[test]
fn from_row_rename_all() {
    let row = Row::from_pairs([
        ("accountNo", Value::from(3u64)),
        ("displayName", Value::from("Ann")),
        ("isActive", Value::from(1)),
    ]);
    let account = Account::from_row(&row).unwrap();
    assert_eq!(account.account_no, Some(3));
    assert_eq!(account.display_name, "Ann");
    assert!(account.is_active);
}

#[test]
fn record_columns_skip_id() {
    let user = User {
        id: 0,
        name: "ann".into(),
        email: Some("a@example.com".into()),
        nickname: String::new(),
        cached: vec![1],
    };
    assert_eq!(user.columns(), &["name", "email_address", "nickname"]);
    assert_eq!(user.column_value("id"), Some(Value::from(0i64)));
    assert_eq!(user.column_value("cached"), None);

    let q = insert_into("users").record(&user).to_query(&MYSQL).unwrap();
    assert_eq!(
        q.interpolate(&MYSQL).unwrap(),
        "INSERT INTO `users` (`name`,`email_address`,`nickname`) VALUES ('ann','a@example.com','')"
    );

    let q = insert_into("users")
        .columns(["id", "name"])
        .record(&user)
        .to_query(&MYSQL)
        .unwrap();
    assert_eq!(q.values, values![0i64, "ann"]);
}

#[tokio::test]
async fn exec_record_sets_generated_id() {
    let conn = MockConn::new().with_exec_result(ExecResult {
        rows_affected: 1,
        last_insert_id: Some(42),
    });
    let sess = Connection::new(conn.clone(), &MYSQL).new_session(None);

    let mut user = User {
        id: 0,
        name: "ann".into(),
        email: None,
        nickname: "a".into(),
        cached: Vec::new(),
    };
    let stmt = insert_into("users").record(&user);
    stmt.exec_record(&sess, &mut user).await.unwrap();
    assert_eq!(user.id, 42);

    let mut account = Account {
        account_no: None,
        display_name: "Ann".into(),
        is_active: true,
    };
    let stmt = insert_into("accounts").record(&account);
    stmt.exec_record(&sess, &mut account).await.unwrap();
    assert_eq!(account.account_no, Some(42));

    assert_eq!(
        conn.statements()[1],
        "INSERT INTO `accounts` (`displayName`,`isActive`) VALUES ('Ann',1)"
    );
}
