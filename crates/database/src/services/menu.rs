use crate::{
    entities::menu_items,
    error::{ServiceError, ServiceResult},
};
use chrono::Utc;
use models::menu::{MenuItemInput, MenuItemUpdate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

pub struct MenuService;

impl MenuService {
    /// Items currently offered, grouped by category
    pub async fn list_available(db: &DatabaseConnection) -> Result<Vec<menu_items::Model>, DbErr> {
        menu_items::Entity::find()
            .filter(menu_items::Column::Available.eq(true))
            .order_by_asc(menu_items::Column::Category)
            .order_by_asc(menu_items::Column::Name)
            .all(db)
            .await
    }

    pub async fn categories(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
        menu_items::Entity::find()
            .select_only()
            .column(menu_items::Column::Category)
            .distinct()
            .filter(menu_items::Column::Available.eq(true))
            .order_by_asc(menu_items::Column::Category)
            .into_tuple()
            .all(db)
            .await
    }

    pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<menu_items::Model>, DbErr> {
        menu_items::Entity::find_by_id(id).one(db).await
    }

    pub async fn create(
        db: &DatabaseConnection,
        input: MenuItemInput,
    ) -> ServiceResult<menu_items::Model> {
        input.validate().map_err(ServiceError::Invalid)?;

        let item = menu_items::Model {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            image_url: input.image_url,
            available: input.available,
            created_at: Utc::now(),
        };

        menu_items::Entity::insert(item.clone().into_active_model().reset_all())
            .exec_without_returning(db)
            .await?;

        Ok(item)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        changes: MenuItemUpdate,
    ) -> ServiceResult<menu_items::Model> {
        changes.validate().map_err(ServiceError::Invalid)?;

        let mut item = Self::find(db, id)
            .await?
            .ok_or(ServiceError::NotFound("Menu item"))?;

        if let Some(name) = changes.name {
            item.name = name;
        }
        if let Some(description) = changes.description {
            item.description = description;
        }
        if let Some(price) = changes.price {
            item.price = price;
        }
        if let Some(category) = changes.category {
            item.category = category;
        }
        if let Some(image_url) = changes.image_url {
            item.image_url = image_url;
        }
        if let Some(available) = changes.available {
            item.available = available;
        }

        menu_items::Entity::update_many()
            .set(item.clone().into_active_model().reset_all())
            .filter(menu_items::Column::Id.eq(id))
            .exec(db)
            .await?;

        Ok(item)
    }

    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> ServiceResult<()> {
        let result = menu_items::Entity::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("Menu item"));
        }
        Ok(())
    }
}
