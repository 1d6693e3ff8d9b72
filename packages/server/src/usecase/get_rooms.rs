//! UseCase: ルーム一覧取得処理
//!
//! デバッグ用 HTTP エンドポイントから使われます。ゴースト参加者の調査で
//! 「今どのルームに誰がいるか」を外から覗けるようにするためのものです。

use std::sync::Arc;

use crate::domain::{Room, RoomRegistry};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Registry（ルームメンバーシップの正本）
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 現在の全ルームをルーム ID 順で取得
    pub async fn execute(&self) -> Vec<Room> {
        let mut rooms = self.registry.get_rooms().await;

        // Sort by room id for consistent ordering
        rooms.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

        rooms
    }
}
