use sea_orm::entity::prelude::*;

/// Login accounts. `password` holds an argon2 PHC string, or legacy plaintext.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password: String,
    pub role: String,
}

impl ActiveModelBehavior for ActiveModel {}
