//! Room ID の生成

use rand::Rng;

use super::{RoomId, ValueObjectError};

/// 生成する Room ID の長さ
pub const ROOM_ID_LEN: usize = 6;

const ROOM_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Room ID を生成するファクトリ
///
/// 36 文字種 × 6 桁（約 21 億通り）のランダムな ID を返す。
/// 既存 ID との衝突チェックは Repository 側で行う。
pub struct RoomIdFactory;

impl RoomIdFactory {
    pub fn generate() -> Result<RoomId, ValueObjectError> {
        let mut rng = rand::rng();
        let id: String = (0..ROOM_ID_LEN)
            .map(|_| ROOM_ID_ALPHABET[rng.random_range(0..ROOM_ID_ALPHABET.len())] as char)
            .collect();
        RoomId::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_returns_short_lowercase_id() {
        // テスト項目: 生成される ID は 6 桁の英小文字・数字
        // given / when:
        let id = RoomIdFactory::generate().unwrap();

        // then (期待する結果):
        assert_eq!(id.as_str().len(), ROOM_ID_LEN);
        assert!(
            id.as_str()
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_generate_rarely_collides() {
        // テスト項目: 連続生成しても衝突はほぼ起きない
        // given (前提条件):
        let mut ids = std::collections::HashSet::new();

        // when (操作):
        for _ in 0..1000 {
            ids.insert(RoomIdFactory::generate().unwrap());
        }

        // then (期待する結果):
        assert!(ids.len() >= 999);
    }
}
