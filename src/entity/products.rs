use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub description: Option<String>,
    pub quantity: i32,
    pub categoryid: Option<i64>,
    pub supermarketid: Option<i64>,
    pub date_added: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::Categoryid",
        to = "super::categories::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::supermarkets::Entity",
        from = "Column::Supermarketid",
        to = "super::supermarkets::Column::Id"
    )]
    Supermarket,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::supermarkets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supermarket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
