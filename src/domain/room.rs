// ==========================================
// 酒店维护导入 - 房间模型
// ==========================================

use serde::{Deserialize, Serialize};

/// 校验后的房间行（缺省值已填充）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomImportRow {
    pub numero: String,
    pub nom: String,
    pub batiment: String,
    pub etage: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub capacite: u32,
    pub prix: Option<f64>,
    pub surface: Option<f64>,
    pub description: String,
    pub equipements: String,
}

/// 房间创建数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomData {
    pub number: String,
    pub floor: i64,
    #[serde(rename = "type")]
    pub room_type: String,
    pub capacity: u32,
    pub description: Option<String>,
    pub building: Option<String>,
    pub amenities: Option<Vec<String>>,
}
