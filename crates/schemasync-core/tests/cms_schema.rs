//! Integration tests for create-schema DDL generation.
//!
//! These tests build a realistic content-management model (users, groups,
//! tags, addresses, emails, phone numbers, plus two many-to-many join
//! tables), run it through the builder, differ, and emitter, and verify the
//! exact statement sequence for the MySQL family.

use schemasync_core::prelude::*;

fn cms_entities() -> Vec<EntityMetadata> {
    vec![
        EntityMetadata::new("CmsGroup", "cms_groups")
            .field(FieldMetadata::new("id", SemanticType::Integer).generated_id())
            .field(FieldMetadata::new("name", SemanticType::String(50))),
        EntityMetadata::new("CmsUser", "cms_users")
            .field(FieldMetadata::new("id", SemanticType::Integer).generated_id())
            .field(FieldMetadata::new("status", SemanticType::String(50)).nullable())
            .field(FieldMetadata::new("username", SemanticType::String(255)).unique())
            .field(FieldMetadata::new("name", SemanticType::String(255)))
            .association(AssociationMetadata::ToOne {
                join_column: JoinColumn::new("email_id", "cms_emails", "id", SemanticType::Integer)
                    .unique(),
                on_delete: None,
            })
            .association(AssociationMetadata::ManyToMany {
                join_table: "cms_users_groups".to_string(),
                owner: JoinColumn::new("user_id", "cms_users", "id", SemanticType::Integer),
                inverse: JoinColumn::new("group_id", "cms_groups", "id", SemanticType::Integer),
            })
            .association(AssociationMetadata::ManyToMany {
                join_table: "cms_users_tags".to_string(),
                owner: JoinColumn::new("user_id", "cms_users", "id", SemanticType::Integer),
                inverse: JoinColumn::new("tag_id", "cms_tags", "id", SemanticType::Integer),
            }),
        EntityMetadata::new("CmsTag", "cms_tags")
            .field(FieldMetadata::new("id", SemanticType::Integer).generated_id())
            .field(FieldMetadata::new("tag_name", SemanticType::String(50)).nullable()),
        EntityMetadata::new("CmsAddress", "cms_addresses")
            .field(FieldMetadata::new("id", SemanticType::Integer).generated_id())
            .field(FieldMetadata::new("country", SemanticType::String(50)))
            .field(FieldMetadata::new("zip", SemanticType::String(50)))
            .field(FieldMetadata::new("city", SemanticType::String(50)))
            .association(AssociationMetadata::ToOne {
                join_column: JoinColumn::new("user_id", "cms_users", "id", SemanticType::Integer)
                    .unique(),
                on_delete: None,
            }),
        EntityMetadata::new("CmsEmail", "cms_emails")
            .field(FieldMetadata::new("id", SemanticType::Integer).generated_id())
            .field(FieldMetadata::new("email", SemanticType::String(250))),
        EntityMetadata::new("CmsPhonenumber", "cms_phonenumbers")
            .field(FieldMetadata::new("phonenumber", SemanticType::String(50)).assigned_id())
            .association(AssociationMetadata::ToOne {
                join_column: JoinColumn::new("user_id", "cms_users", "id", SemanticType::Integer),
                on_delete: None,
            }),
    ]
}

fn create_schema_sql(entities: &[EntityMetadata], dialect: &dyn DialectAdapter) -> Vec<String> {
    let desired = build_schema(entities);
    let changes = diff(&SchemaModel::new(), &desired, &AssetFilter::None);
    emit(&changes, dialect).unwrap()
}

const OPTIONS: &str = " DEFAULT CHARACTER SET utf8 COLLATE utf8_unicode_ci ENGINE = InnoDB";

#[test]
fn cms_model_generates_exact_mysql_statement_sequence() {
    let statements = create_schema_sql(&cms_entities(), &MySqlDialect::new());

    let expected = vec![
        format!("CREATE TABLE cms_groups (id INT AUTO_INCREMENT NOT NULL, name VARCHAR(50) NOT NULL, PRIMARY KEY(id)){OPTIONS}"),
        format!("CREATE TABLE cms_users (id INT AUTO_INCREMENT NOT NULL, status VARCHAR(50) DEFAULT NULL, username VARCHAR(255) NOT NULL, name VARCHAR(255) NOT NULL, email_id INT DEFAULT NULL, UNIQUE INDEX UNIQ_3AF03EC5F85E0677 (username), UNIQUE INDEX UNIQ_3AF03EC5A832C1C9 (email_id), PRIMARY KEY(id)){OPTIONS}"),
        format!("CREATE TABLE cms_users_groups (user_id INT NOT NULL, group_id INT NOT NULL, INDEX IDX_7EA9409AA76ED395 (user_id), INDEX IDX_7EA9409AFE54D947 (group_id), PRIMARY KEY(user_id, group_id)){OPTIONS}"),
        format!("CREATE TABLE cms_users_tags (user_id INT NOT NULL, tag_id INT NOT NULL, INDEX IDX_93F5A1ADA76ED395 (user_id), INDEX IDX_93F5A1ADBAD26311 (tag_id), PRIMARY KEY(user_id, tag_id)){OPTIONS}"),
        format!("CREATE TABLE cms_tags (id INT AUTO_INCREMENT NOT NULL, tag_name VARCHAR(50) DEFAULT NULL, PRIMARY KEY(id)){OPTIONS}"),
        format!("CREATE TABLE cms_addresses (id INT AUTO_INCREMENT NOT NULL, country VARCHAR(50) NOT NULL, zip VARCHAR(50) NOT NULL, city VARCHAR(50) NOT NULL, user_id INT DEFAULT NULL, UNIQUE INDEX UNIQ_ACAC157BA76ED395 (user_id), PRIMARY KEY(id)){OPTIONS}"),
        format!("CREATE TABLE cms_emails (id INT AUTO_INCREMENT NOT NULL, email VARCHAR(250) NOT NULL, PRIMARY KEY(id)){OPTIONS}"),
        format!("CREATE TABLE cms_phonenumbers (phonenumber VARCHAR(50) NOT NULL, user_id INT DEFAULT NULL, INDEX IDX_F21F790FA76ED395 (user_id), PRIMARY KEY(phonenumber)){OPTIONS}"),
        "ALTER TABLE cms_users ADD CONSTRAINT FK_3AF03EC5A832C1C9 FOREIGN KEY (email_id) REFERENCES cms_emails (id)".to_string(),
        "ALTER TABLE cms_users_groups ADD CONSTRAINT FK_7EA9409AA76ED395 FOREIGN KEY (user_id) REFERENCES cms_users (id)".to_string(),
        "ALTER TABLE cms_users_groups ADD CONSTRAINT FK_7EA9409AFE54D947 FOREIGN KEY (group_id) REFERENCES cms_groups (id)".to_string(),
        "ALTER TABLE cms_users_tags ADD CONSTRAINT FK_93F5A1ADA76ED395 FOREIGN KEY (user_id) REFERENCES cms_users (id)".to_string(),
        "ALTER TABLE cms_users_tags ADD CONSTRAINT FK_93F5A1ADBAD26311 FOREIGN KEY (tag_id) REFERENCES cms_tags (id)".to_string(),
        "ALTER TABLE cms_addresses ADD CONSTRAINT FK_ACAC157BA76ED395 FOREIGN KEY (user_id) REFERENCES cms_users (id)".to_string(),
        "ALTER TABLE cms_phonenumbers ADD CONSTRAINT FK_F21F790FA76ED395 FOREIGN KEY (user_id) REFERENCES cms_users (id)".to_string(),
    ];

    assert_eq!(statements, expected);
}

#[test]
fn eight_creates_then_seven_constraints() {
    let statements = create_schema_sql(&cms_entities(), &MySqlDialect::new());
    assert_eq!(statements.len(), 15);
    assert!(statements[..8].iter().all(|s| s.starts_with("CREATE TABLE ")));
    assert!(statements[8..].iter().all(|s| s.contains("ADD CONSTRAINT")));
}

#[test]
fn every_referenced_table_is_created_before_its_constraint() {
    let statements = create_schema_sql(&cms_entities(), &MySqlDialect::new());
    for (i, statement) in statements.iter().enumerate() {
        let Some(pos) = statement.find("REFERENCES ") else {
            continue;
        };
        let referenced = statement[pos + "REFERENCES ".len()..]
            .split_whitespace()
            .next()
            .unwrap();
        let created_earlier = statements[..i]
            .iter()
            .any(|s| s.starts_with(&format!("CREATE TABLE {referenced} ")));
        assert!(created_earlier, "{referenced} referenced before creation");
    }
}

#[test]
fn model_without_relationships_emits_no_constraints() {
    let entities = vec![EntityMetadata::new("Plain", "plain")
        .field(FieldMetadata::new("id", SemanticType::Integer).generated_id())];
    let statements = create_schema_sql(&entities, &MySqlDialect::new());
    assert_eq!(statements.len(), 1);
    assert!(!statements[0].contains("FOREIGN KEY"));
}

#[test]
fn reserved_column_names_and_parameterized_types_render_exactly() {
    let entities = vec![EntityMetadata::new("Product", "products")
        .field(FieldMetadata::new("id", SemanticType::Integer).generated_id())
        .field(FieldMetadata::new(
            "decimal",
            SemanticType::Decimal {
                precision: 5,
                scale: 2,
            },
        ))
        .field(FieldMetadata::new("in_stock", SemanticType::Boolean))];

    let statements = create_schema_sql(&entities, &MySqlDialect::new());
    assert_eq!(
        statements[0],
        format!(
            "CREATE TABLE products (id INT AUTO_INCREMENT NOT NULL, \
             `decimal` NUMERIC(5, 2) NOT NULL, in_stock TINYINT(1) NOT NULL, \
             PRIMARY KEY(id)){OPTIONS}"
        )
    );
}

#[test]
fn namespaced_entity_yields_zero_statements() {
    let entities = vec![EntityMetadata::new("Namespaced", "archive.events")
        .field(FieldMetadata::new("id", SemanticType::Integer).generated_id())];
    assert!(create_schema_sql(&entities, &MySqlDialect::new()).is_empty());
    assert!(create_schema_sql(&entities, &SqliteDialect::new()).is_empty());
}

#[test]
fn filtered_entity_is_absent_from_create_sql() {
    let entities = vec![
        EntityMetadata::new("Kept", "my_entity")
            .field(FieldMetadata::new("id", SemanticType::Integer).generated_id()),
        EntityMetadata::new("Excluded", "entity_to_remove")
            .field(FieldMetadata::new("id", SemanticType::Integer).generated_id()),
    ];

    let desired = build_schema(&entities);
    let filter = AssetFilter::predicate(|name| name != "entity_to_remove");
    let changes = diff(&SchemaModel::new(), &desired, &filter);
    let statements = emit(&changes, &SqliteDialect::new()).unwrap();

    assert_eq!(statements.len(), 1);
    assert!(!statements.iter().any(|s| s.contains("entity_to_remove")));
}
