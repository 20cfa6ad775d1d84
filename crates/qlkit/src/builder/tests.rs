use super::*;
use crate::condition::{and, eq, gt, neq, on, or};
use crate::dialect::{MYSQL, POSTGRES};
use crate::error::QlError;
use crate::record::Record;

fn build(b: &impl Builder) -> BuiltQuery {
    b.to_query(&MYSQL).unwrap()
}

// ── SELECT ──

#[test]
fn test_select_all_clauses() {
    let q = build(
        &select(["a", "b"])
            .distinct()
            .from(select(["a"]).from("table"))
            .left_join("table2", on("table.a1", "table.a2"))
            .and_where(eq("c", 1))
            .group_by(["d"])
            .having(eq("e", 2))
            .order_asc("f")
            .limit(3)
            .offset(4),
    );
    assert_eq!(
        q.sql,
        "SELECT DISTINCT `a`, `b` FROM ? LEFT JOIN `table2` ON (`table`.`a1` = `table`.`a2`) \
         WHERE (`c` = ?) GROUP BY `d` HAVING (`e` = ?) ORDER BY `f` ASC LIMIT 3 OFFSET 4"
    );
    assert_eq!(q.values.len(), 3);
    assert_eq!(q.values[1], Value::Int(1));
    assert_eq!(q.values[2], Value::Int(2));

    assert_eq!(
        q.interpolate(&MYSQL).unwrap(),
        "SELECT DISTINCT `a`, `b` FROM (SELECT `a` FROM `table`) LEFT JOIN `table2` ON (`table`.`a1` = `table`.`a2`) \
         WHERE (`c` = 1) GROUP BY `d` HAVING (`e` = 2) ORDER BY `f` ASC LIMIT 3 OFFSET 4"
    );
}

#[test]
fn test_select_without_table() {
    let q = build(&select([expr("NOW()", vec![])]));
    assert_eq!(q.sql, "SELECT ?");
    assert_eq!(q.interpolate(&MYSQL).unwrap(), "SELECT NOW()");

    let q = build(&select(["1"]));
    assert_eq!(q.sql, "SELECT `1`");
}

#[test]
fn test_select_expression_columns_are_verbatim() {
    let q = build(&select(["COUNT(*)", "u.name"]).from("users u"));
    assert_eq!(q.sql, "SELECT COUNT(*), `u`.`name` FROM users u");
}

#[test]
fn test_select_joins() {
    let q = build(
        &select(["*"])
            .from("a")
            .inner_join("b", on("a.id", "b.a_id"))
            .right_join("c", on("a.id", "c.a_id"))
            .full_join("d", on("a.id", "d.a_id"))
            .join(JoinType::Left, "e", [on("a.id", "e.a_id"), eq("e.kind", "x")]),
    );
    assert_eq!(
        q.sql,
        "SELECT * FROM `a` JOIN `b` ON (`a`.`id` = `b`.`a_id`) \
         RIGHT JOIN `c` ON (`a`.`id` = `c`.`a_id`) \
         FULL JOIN `d` ON (`a`.`id` = `d`.`a_id`) \
         LEFT JOIN `e` ON (`a`.`id` = `e`.`a_id`) AND (`e`.`kind` = ?)"
    );
    assert_eq!(q.values, vec![Value::from("x")]);
}

#[test]
fn test_select_no_limit_unless_set() {
    let q = build(&select(["a"]).from("t"));
    assert_eq!(q.sql, "SELECT `a` FROM `t`");

    let q = build(&select(["a"]).from("t").limit(3));
    assert_eq!(q.sql, "SELECT `a` FROM `t` LIMIT 3");
    assert!(q.values.is_empty());

    let q = build(&select(["a"]).from("t").offset(5));
    assert_eq!(q.sql, "SELECT `a` FROM `t` OFFSET 5");
}

#[test]
fn test_paginate() {
    let q = build(&select(["a"]).from("t").paginate(3, 20));
    assert_eq!(q.sql, "SELECT `a` FROM `t` LIMIT 20 OFFSET 40");

    let q = build(&select(["a"]).from("t").paginate(0, 20));
    assert_eq!(q.sql, "SELECT `a` FROM `t` LIMIT 20 OFFSET 0");
}

#[test]
fn test_select_nested_conditions() {
    let q = build(
        &select(["a"])
            .from("t")
            .and_where(or([eq("b", 1), and([gt("c", 2), neq("d", Value::Null)])]))
            .where_sql("e > ?", crate::values![5]),
    );
    assert_eq!(
        q.sql,
        "SELECT `a` FROM `t` WHERE ((`b` = ?) OR ((`c` > ?) AND (`d` IS NOT NULL))) AND (e > ?)"
    );
    assert_eq!(q.values, crate::values![1, 2, 5]);
}

#[test]
fn test_select_empty_groups_render_nothing() {
    let q = build(&select(["a"]).from("t").and_where(and([])).having(or([])));
    assert_eq!(q.sql, "SELECT `a` FROM `t`");
}

#[test]
fn test_select_order_by_expression() {
    let q = build(
        &select(["a"])
            .from("t")
            .order_desc("b")
            .order_by_sql("FIELD(c, ?, ?)", crate::values!["x", "y"]),
    );
    assert_eq!(q.sql, "SELECT `a` FROM `t` ORDER BY `b` DESC, FIELD(c, ?, ?)");
    assert_eq!(q.values.len(), 2);
}

#[test]
fn test_select_alias_column() {
    let q = build(&select([Ident::from(alias("a", "b"))]).from("t"));
    assert_eq!(q.interpolate(&MYSQL).unwrap(), "SELECT `a` AS `b` FROM `t`");
}

#[test]
fn test_select_by_sql_ignores_other_clauses() {
    let q = build(
        &select_by_sql("SELECT * FROM t WHERE id = ?", crate::values![7])
            .from("ignored")
            .limit(1),
    );
    assert_eq!(q.sql, "SELECT * FROM t WHERE id = ?");
    assert_eq!(q.values, crate::values![7]);
}

#[test]
fn test_select_errors() {
    let err = SelectBuilder::new().from("t").to_query(&MYSQL).unwrap_err();
    assert!(matches!(err, QlError::ColumnNotSpecified));

    let err = select(["a"]).from("").to_query(&MYSQL).unwrap_err();
    assert!(matches!(err, QlError::TableNotSpecified));

    let err = select(["a"])
        .left_join("b", on("a.id", "b.a_id"))
        .to_query(&MYSQL)
        .unwrap_err();
    assert!(matches!(err, QlError::TableNotSpecified));
}

#[test]
fn test_select_postgres_quoting() {
    let q = select(["a"])
        .from("t")
        .and_where(eq("b", true))
        .to_query(&POSTGRES)
        .unwrap();
    assert_eq!(q.sql, "SELECT \"a\" FROM \"t\" WHERE (\"b\" = ?)");
    assert_eq!(
        q.interpolate(&POSTGRES).unwrap(),
        "SELECT \"a\" FROM \"t\" WHERE (\"b\" = TRUE)"
    );
}

// ── INSERT ──

#[test]
fn test_insert() {
    let q = build(
        &insert_into("t")
            .columns(["a", "b"])
            .values(crate::values![1, "x"])
            .values(crate::values![2, "y"]),
    );
    assert_eq!(q.sql, "INSERT INTO `t` (`a`,`b`) VALUES (?,?), (?,?)");
    assert_eq!(q.values, crate::values![1, "x", 2, "y"]);
    assert_eq!(
        q.interpolate(&MYSQL).unwrap(),
        "INSERT INTO `t` (`a`,`b`) VALUES (1,'x'), (2,'y')"
    );
}

#[test]
fn test_insert_pair() {
    let q = build(&insert_into("t").pair("a", 1).pair("b", "x"));
    assert_eq!(q.sql, "INSERT INTO `t` (`a`,`b`) VALUES (?,?)");
    assert_eq!(q.values, crate::values![1, "x"]);
}

#[test]
fn test_insert_pair_on_multi_row_fails() {
    let err = insert_into("t")
        .columns(["a"])
        .values(crate::values![1])
        .values(crate::values![2])
        .pair("b", 3)
        .to_query(&MYSQL)
        .unwrap_err();
    assert!(matches!(err, QlError::BadArgument(_)));
}

#[test]
fn test_insert_errors_leave_no_output() {
    let mut buf = Buffer::new();
    let err = insert_into("t").build(&MYSQL, &mut buf).unwrap_err();
    assert!(matches!(err, QlError::ColumnNotSpecified));
    assert!(buf.is_empty());
    assert!(buf.values().is_empty());

    let err = insert_into("").columns(["a"]).to_query(&MYSQL).unwrap_err();
    assert!(matches!(err, QlError::TableNotSpecified));

    let err = insert_into("t").columns(["a"]).to_query(&MYSQL).unwrap_err();
    assert!(matches!(err, QlError::ValuesNotSpecified));

    let err = insert_into("t")
        .columns(["a", "b"])
        .values(crate::values![1])
        .to_query(&MYSQL)
        .unwrap_err();
    assert!(matches!(err, QlError::BadArgument(_)));
}

struct Person {
    id: i64,
    name: String,
    email: Option<String>,
}

impl Record for Person {
    fn columns(&self) -> &'static [&'static str] {
        &["id", "name", "email"]
    }

    fn column_value(&self, column: &str) -> Option<Value> {
        match column {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.clone().into()),
            "email" => Some(self.email.clone().into()),
            _ => None,
        }
    }
}

#[test]
fn test_insert_record() {
    let person = Person {
        id: 0,
        name: "ann".to_string(),
        email: None,
    };

    let q = build(&insert_into("people").columns(["name", "email", "age"]).record(&person));
    assert_eq!(q.sql, "INSERT INTO `people` (`name`,`email`,`age`) VALUES (?,?,?)");
    assert_eq!(q.values, vec![Value::from("ann"), Value::Null, Value::Null]);

    let q = build(&insert_into("people").record(&person));
    assert_eq!(q.sql, "INSERT INTO `people` (`id`,`name`,`email`) VALUES (?,?,?)");
}

// ── UPDATE ──

#[test]
fn test_update() {
    let q = build(
        &update("t")
            .set("a", 1)
            .set("b", "x")
            .set("a", 2)
            .and_where(eq("id", 5))
            .limit(1),
    );
    assert_eq!(q.sql, "UPDATE `t` SET `a` = ?, `b` = ? WHERE (`id` = ?) LIMIT 1");
    assert_eq!(q.values, crate::values![2, "x", 5]);
}

#[test]
fn test_update_set_map_and_subquery_value() {
    let q = build(
        &update("t")
            .set_map([("a", Value::from(1))])
            .set("b", select(["max(b)"]).from("u")),
    );
    assert_eq!(
        q.interpolate(&MYSQL).unwrap(),
        "UPDATE `t` SET `a` = 1, `b` = (SELECT max(b) FROM `u`)"
    );
}

#[test]
fn test_update_errors() {
    let err = update("t").to_query(&MYSQL).unwrap_err();
    assert!(matches!(err, QlError::ColumnNotSpecified));

    let err = update("").set("a", 1).to_query(&MYSQL).unwrap_err();
    assert!(matches!(err, QlError::TableNotSpecified));

    let err = update("t").set("a", 1).limit(1).to_query(&POSTGRES).unwrap_err();
    assert!(matches!(err, QlError::NotSupported(_)));
}

// ── DELETE ──

#[test]
fn test_delete() {
    let q = build(&delete_from("t").and_where(eq("id", 5)));
    assert_eq!(q.sql, "DELETE FROM `t` WHERE (`id` = ?)");
    assert_eq!(q.values, crate::values![5]);

    let q = build(&delete_from("t").limit(10));
    assert_eq!(q.sql, "DELETE FROM `t` LIMIT 10");
}

#[test]
fn test_delete_errors() {
    let err = delete_from("").to_query(&MYSQL).unwrap_err();
    assert!(matches!(err, QlError::TableNotSpecified));

    let err = delete_from("t").limit(1).to_query(&POSTGRES).unwrap_err();
    assert!(matches!(err, QlError::NotSupported(_)));
}

// ── raw statements ──

#[test]
fn test_by_sql_statements() {
    let q = build(&insert_by_sql("INSERT INTO t VALUES (?)", crate::values![1]));
    assert_eq!(q.sql, "INSERT INTO t VALUES (?)");

    let q = build(&update_by_sql("UPDATE t SET a = ?", crate::values![1]));
    assert_eq!(q.sql, "UPDATE t SET a = ?");

    let q = build(&delete_by_sql("DELETE FROM t", vec![]));
    assert_eq!(q.sql, "DELETE FROM t");
    assert!(q.values.is_empty());
}

#[test]
fn test_statement_kinds() {
    assert_eq!(select(["a"]).kind(), "select");
    assert_eq!(insert_into("t").kind(), "insert");
    assert_eq!(update("t").kind(), "update");
    assert_eq!(delete_from("t").kind(), "delete");
}

#[test]
fn test_only_select_is_subquery() {
    assert!(select(["a"]).is_subquery());
    assert!(!insert_into("t").is_subquery());
    assert!(!expr("1", vec![]).is_subquery());
}
