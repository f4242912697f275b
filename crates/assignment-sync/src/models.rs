//! Models
//!
//! Data structures matching the Curso REST API.

use serde::{Deserialize, Serialize};

/// Area data structure (matches backend `area` rows)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    #[serde(rename = "id_area")]
    pub id: i64,
    #[serde(rename = "nombre_area")]
    pub name: String,
}

impl Area {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Body of `POST /cursoArea/{id}`: full replacement list
#[derive(Debug, Serialize)]
pub struct AreaIdsBody<'a> {
    #[serde(rename = "areaIds")]
    pub area_ids: &'a [i64],
}

/// Body of `DELETE /cursoArea/{id}`
#[derive(Debug, Serialize)]
pub struct AreaIdBody {
    #[serde(rename = "areaId")]
    pub area_id: i64,
}
