//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! Room ごとに `tokio::sync::Mutex` を持ち、Room の索引（HashMap）自体も Mutex で保護します。
//!
//! ## ロック順序
//!
//! - `add` / `remove` / `enter` / `leave`: 索引 → Room の順でロックし、Room の破棄と参加が競合しないようにする
//! - `broadcast` / `list` / `relocate`: 索引のロックは Room のハンドルを複製する間だけ保持する
//!
//! Room のロックを保持したまま索引をロックすることはない。
//! 配信は unbounded チャンネルへの送信なので、ロック保持中にソケット I/O を待つことはない。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Grid, MoveOutcome, Participant, Position, PusherChannel, RegistryError,
    RoomRegistry, RoomSummary, ServerEvent, SpaceId, validate_move,
};

/// Room に参加しているメンバー（正規の参加者レコードと送信チャンネル）
struct Member {
    participant: Participant,
    channel: PusherChannel,
}

/// 1 つの Room の状態
#[derive(Default)]
struct RoomState {
    /// 参加順に保持する
    members: Vec<Member>,
}

impl RoomState {
    fn position_of(&self, connection_id: &ConnectionId) -> Option<usize> {
        self.members
            .iter()
            .position(|m| &m.participant.connection_id == connection_id)
    }

    fn snapshot(&self) -> Vec<Participant> {
        self.members.iter().map(|m| m.participant.clone()).collect()
    }

    fn insert(&mut self, participant: Participant, channel: PusherChannel) -> Result<(), RegistryError> {
        if self.position_of(&participant.connection_id).is_some() {
            return Err(RegistryError::DuplicateParticipant(
                participant.connection_id.into_string(),
            ));
        }
        self.members.push(Member {
            participant,
            channel,
        });
        Ok(())
    }

    fn take(&mut self, connection_id: &ConnectionId) -> Option<Participant> {
        self.position_of(connection_id)
            .map(|index| self.members.remove(index).participant)
    }

    /// `sender` 以外へ配信する。一部の送信失敗は許容する（切断処理中のクライアントなど）
    fn fan_out(&self, event: &ServerEvent, sender: Option<&ConnectionId>) -> usize {
        let mut delivered = 0;
        for member in &self.members {
            let id = &member.participant.connection_id;
            if Some(id) == sender {
                continue;
            }
            if let Err(e) = member.channel.send(event.clone()) {
                tracing::warn!("Failed to push '{}' to connection '{}': {}", event.kind(), id, e);
            } else {
                delivered += 1;
            }
        }
        delivered
    }
}

type SharedRoom = Arc<Mutex<RoomState>>;

/// インメモリ Room Registry 実装
///
/// プロセスにつき 1 つ生成し、`Arc<dyn RoomRegistry>` として各ユースケースへ注入する。
#[derive(Default)]
pub struct InMemoryRoomRegistry {
    rooms: Mutex<HashMap<SpaceId, SharedRoom>>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }

    async fn room(&self, space_id: &SpaceId) -> Option<SharedRoom> {
        self.rooms.lock().await.get(space_id).cloned()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn add(
        &self,
        space_id: &SpaceId,
        participant: Participant,
        channel: PusherChannel,
    ) -> Result<(), RegistryError> {
        let mut rooms = self.rooms.lock().await;
        let shared = rooms.entry(space_id.clone()).or_default().clone();
        let mut room = shared.lock().await;
        room.insert(participant, channel)
    }

    async fn remove(
        &self,
        connection_id: &ConnectionId,
        space_id: &SpaceId,
    ) -> Option<Participant> {
        let mut rooms = self.rooms.lock().await;
        let shared = rooms.get(space_id).cloned()?;
        let mut room = shared.lock().await;
        let removed = room.take(connection_id);
        if room.members.is_empty() {
            rooms.remove(space_id);
            tracing::debug!("Room '{}' is empty and was evicted", space_id);
        }
        removed
    }

    async fn broadcast(
        &self,
        event: ServerEvent,
        sender: Option<&ConnectionId>,
        space_id: &SpaceId,
    ) -> usize {
        let Some(shared) = self.room(space_id).await else {
            return 0;
        };
        let room = shared.lock().await;
        room.fan_out(&event, sender)
    }

    async fn list(&self, space_id: &SpaceId) -> Vec<Participant> {
        match self.room(space_id).await {
            Some(shared) => shared.lock().await.snapshot(),
            None => Vec::new(),
        }
    }

    async fn enter(
        &self,
        space_id: &SpaceId,
        participant: Participant,
        channel: PusherChannel,
    ) -> Result<Vec<Participant>, RegistryError> {
        let mut rooms = self.rooms.lock().await;
        let shared = rooms.entry(space_id.clone()).or_default().clone();
        let mut room = shared.lock().await;

        if room.position_of(&participant.connection_id).is_some() {
            return Err(RegistryError::DuplicateParticipant(
                participant.connection_id.into_string(),
            ));
        }

        let snapshot = room.snapshot();
        let joined = ServerEvent::SpaceJoined {
            user_id: participant.user_id.clone(),
            spawn: participant.position,
            users: snapshot.clone(),
            role: participant.role,
        };
        // 自分宛ての返信を先にキューへ積み、他メンバーからのイベントより前に届くようにする
        if let Err(e) = channel.send(joined) {
            tracing::warn!(
                "Connection '{}' closed before space-joined could be queued: {}",
                participant.connection_id,
                e
            );
        }

        let connection_id = participant.connection_id.clone();
        let announcement = ServerEvent::UserJoined(participant.clone());
        room.insert(participant, channel)?;
        room.fan_out(&announcement, Some(&connection_id));

        Ok(snapshot)
    }

    async fn relocate(
        &self,
        space_id: &SpaceId,
        connection_id: &ConnectionId,
        proposed: Position,
        grid: Grid,
    ) -> Result<MoveOutcome, RegistryError> {
        let not_member = || RegistryError::NotMember(connection_id.as_str().to_string());
        let shared = self.room(space_id).await.ok_or_else(not_member)?;
        let mut room = shared.lock().await;
        let index = room.position_of(connection_id).ok_or_else(not_member)?;

        let member = &mut room.members[index];
        let current = member.participant.position;
        match validate_move(grid, current, proposed) {
            Ok(()) => {
                member.participant.position = proposed;
                let movement = ServerEvent::Movement {
                    user_id: member.participant.user_id.clone(),
                    position: proposed,
                    role: member.participant.role,
                };
                room.fan_out(&movement, Some(connection_id));
                Ok(MoveOutcome::Accepted(proposed))
            }
            Err(reason) => {
                if let Err(e) = member.channel.send(ServerEvent::MovementRejected(current)) {
                    tracing::warn!(
                        "Failed to push movement-rejected to connection '{}': {}",
                        connection_id,
                        e
                    );
                }
                Ok(MoveOutcome::Rejected { current, reason })
            }
        }
    }

    async fn leave(
        &self,
        connection_id: &ConnectionId,
        space_id: &SpaceId,
    ) -> Option<Participant> {
        let mut rooms = self.rooms.lock().await;
        let shared = rooms.get(space_id).cloned()?;
        let mut room = shared.lock().await;

        let participant = room.take(connection_id)?;
        room.fan_out(
            &ServerEvent::UserLeft {
                user_id: participant.user_id.clone(),
            },
            Some(connection_id),
        );
        if room.members.is_empty() {
            rooms.remove(space_id);
            tracing::debug!("Room '{}' is empty and was evicted", space_id);
        }
        Some(participant)
    }

    async fn rooms(&self) -> Vec<RoomSummary> {
        let handles: Vec<(SpaceId, SharedRoom)> = self
            .rooms
            .lock()
            .await
            .iter()
            .map(|(id, room)| (id.clone(), room.clone()))
            .collect();

        let mut summaries = Vec::with_capacity(handles.len());
        for (space_id, shared) in handles {
            let participant_count = shared.lock().await.members.len();
            if participant_count > 0 {
                summaries.push(RoomSummary {
                    space_id,
                    participant_count,
                });
            }
        }
        summaries.sort_by(|a, b| a.space_id.as_str().cmp(b.space_id.as_str()));
        summaries
    }
}
