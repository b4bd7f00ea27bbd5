use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::validation::SLUG_REGEX;

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub display_order: i32,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            parent_id: c.parent_id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            image_url: c.image_url,
            display_order: c.display_order,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    /// Build tree from flat list of categories
    pub fn build_tree(categories: Vec<Category>) -> Vec<CategoryTreeDto> {
        let roots: Vec<&Category> = categories
            .iter()
            .filter(|c| c.parent_id.is_none())
            .collect();

        roots
            .into_iter()
            .map(|root| Self::build_node(root, &categories))
            .collect()
    }

    fn build_node(category: &Category, all_categories: &[Category]) -> CategoryTreeDto {
        let children: Vec<CategoryTreeDto> = all_categories
            .iter()
            .filter(|c| c.parent_id == Some(category.id))
            .map(|child| Self::build_node(child, all_categories))
            .collect();

        CategoryTreeDto {
            id: category.id,
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            image_url: category.image_url.clone(),
            display_order: category.display_order,
            children,
        }
    }
}

/// Request DTO for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    pub parent_id: Option<Uuid>,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 255, message = "Slug must be 1-255 characters"),
        regex(
            path = *SLUG_REGEX,
            message = "Slug must be lowercase alphanumeric with hyphens"
        )
    )]
    pub slug: String,

    pub description: Option<String>,

    pub image_url: Option<String>,

    #[serde(default)]
    pub display_order: i32,
}

/// Request DTO for updating a category; absent fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,

    pub image_url: Option<String>,

    pub display_order: Option<i32>,

    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(id: Uuid, parent_id: Option<Uuid>, name: &str, order: i32) -> Category {
        Category {
            id,
            parent_id,
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: None,
            image_url: None,
            display_order: order,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_tree_nests_children() {
        let doors = Uuid::new_v4();
        let handles = Uuid::new_v4();
        let hidden = Uuid::new_v4();

        let tree = CategoryTreeDto::build_tree(vec![
            category(doors, None, "Doors", 0),
            category(hidden, Some(doors), "Hidden", 1),
            category(handles, None, "Handles", 1),
        ]);

        assert_eq!(tree.len(), 2);
        let doors_node = tree.iter().find(|n| n.id == doors).unwrap();
        assert_eq!(doors_node.children.len(), 1);
        assert_eq!(doors_node.children[0].id, hidden);
    }
}
