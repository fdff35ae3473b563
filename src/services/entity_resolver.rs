//! Resolución de nombres para referencias polimórficas
//!
//! Las líneas de logística y los vehículos de traslado referencian
//! entidades de distintas tablas mediante un par (tipo, id). Este
//! servicio resuelve ese par a un nombre legible con un único
//! despacho por tipo, en lugar de joins condicionales en cada query.

use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

/// Tipos de entidad referenciables desde logística y traslados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Client,
    Guide,
    Hotel,
    Location,
    ThirdParty,
    Vehicle,
}

impl EntityType {
    /// Parsear el tag textual que viaja en los registros
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "client" => Some(Self::Client),
            "guide" | "staff" => Some(Self::Guide),
            "hotel" => Some(Self::Hotel),
            "location" => Some(Self::Location),
            "third-party" => Some(Self::ThirdParty),
            "vehicle" => Some(Self::Vehicle),
            _ => None,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    vehicle_type: String,
    ownership: String,
    hotel_name: Option<String>,
    third_party_name: Option<String>,
}

/// Etiqueta de un vehículo: tipo + propietario
fn vehicle_label(row: &VehicleRow) -> String {
    let owner = match row.ownership.as_str() {
        "hotel" => row.hotel_name.as_deref().unwrap_or("Company"),
        "third-party" => row.third_party_name.as_deref().unwrap_or("Company"),
        _ => "Company",
    };
    format!("{} - {}", row.vehicle_type, owner)
}

pub struct EntityResolver {
    pool: PgPool,
}

impl EntityResolver {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolver el nombre legible de una entidad referenciada.
    ///
    /// Devuelve `None` si el tag no es reconocido o la entidad no existe.
    pub async fn display_name(
        &self,
        entity_type: &str,
        entity_id: Uuid,
    ) -> Result<Option<String>, AppError> {
        let Some(kind) = EntityType::parse(entity_type) else {
            return Ok(None);
        };

        match kind {
            EntityType::Client => self.name_from("clients", "full_name", entity_id).await,
            EntityType::Guide => self.name_from("guides", "full_name", entity_id).await,
            EntityType::Hotel => self.name_from("hotels", "name", entity_id).await,
            EntityType::Location => self.name_from("locations", "name", entity_id).await,
            EntityType::ThirdParty => self.name_from("third_parties", "name", entity_id).await,
            EntityType::Vehicle => self.vehicle_name(entity_id).await,
        }
    }

    async fn name_from(
        &self,
        table: &str,
        column: &str,
        id: Uuid,
    ) -> Result<Option<String>, AppError> {
        // table y column vienen del match de arriba, nunca del caller
        let query = format!("SELECT {} FROM {} WHERE id = $1", column, table);
        let row: Option<(String,)> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error resolving entity name: {}", e)))?;

        Ok(row.map(|(name,)| name))
    }

    async fn vehicle_name(&self, id: Uuid) -> Result<Option<String>, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT v.vehicle_type, v.ownership, h.name AS hotel_name, t.name AS third_party_name
            FROM vehicles v
            LEFT JOIN hotels h ON h.id = v.hotel_id
            LEFT JOIN third_parties t ON t.id = v.third_party_id
            WHERE v.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error resolving vehicle name: {}", e)))?;

        Ok(row.map(|r| vehicle_label(&r)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity_type() {
        assert_eq!(EntityType::parse("hotel"), Some(EntityType::Hotel));
        assert_eq!(EntityType::parse("third-party"), Some(EntityType::ThirdParty));
        assert_eq!(EntityType::parse("staff"), Some(EntityType::Guide));
        assert_eq!(EntityType::parse("unknown"), None);
    }

    #[test]
    fn test_vehicle_label_company() {
        let row = VehicleRow {
            vehicle_type: "4x4".to_string(),
            ownership: "company".to_string(),
            hotel_name: None,
            third_party_name: None,
        };
        assert_eq!(vehicle_label(&row), "4x4 - Company");
    }

    #[test]
    fn test_vehicle_label_hotel() {
        let row = VehicleRow {
            vehicle_type: "Van".to_string(),
            ownership: "hotel".to_string(),
            hotel_name: Some("Hotel Amazonas".to_string()),
            third_party_name: None,
        };
        assert_eq!(vehicle_label(&row), "Van - Hotel Amazonas");
    }

    #[test]
    fn test_vehicle_label_third_party() {
        let row = VehicleRow {
            vehicle_type: "Boat".to_string(),
            ownership: "third-party".to_string(),
            hotel_name: None,
            third_party_name: Some("River Tours SA".to_string()),
        };
        assert_eq!(vehicle_label(&row), "Boat - River Tours SA");
    }
}
