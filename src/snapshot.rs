use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, SaveError};
use crate::types::{Cell, Colour};

const MAGIC: &[u8; 4] = b"RVSN";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Vec<Vec<Cell>>,
    pub current_player: Colour,
    pub game_won: bool,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(data: &[u8]) -> Result<Self, LoadError> {
        serde_json::from_slice(data).map_err(LoadError::new)
    }

    pub fn save(&self, path: &Path) -> Result<(), SaveError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let data = fs::read(path).map_err(LoadError::new)?;
        Self::from_json(&data)
    }

    /// Packs the snapshot as a 20-byte header (magic, version, size, CRC32
    /// of the payload, reserved) followed by the side to move, the game-over
    /// flag and one byte per cell.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(2 + self.board.len() * self.board.len());
        payload.push(Cell::from(self.current_player).code());
        payload.push(u8::from(self.game_won));
        for row in &self.board {
            payload.extend(row.iter().map(|cell| cell.code()));
        }

        let crc = crc32fast::hash(&payload);
        let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&(self.board.len() as u32).to_le_bytes());
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&payload);
        out
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, LoadError> {
        if data.len() < HEADER_SIZE {
            return Err(LoadError::format(format!(
                "snapshot too short: expected at least {HEADER_SIZE} bytes, got {}",
                data.len()
            )));
        }

        if &data[0..4] != MAGIC {
            return Err(LoadError::format("invalid snapshot magic (expected RVSN)"));
        }

        let version = read_u32_le(data, 4)?;
        if version != VERSION {
            return Err(LoadError::format(format!(
                "unsupported snapshot version: expected {VERSION}, got {version}"
            )));
        }

        let size = read_u32_le(data, 8)? as usize;
        let expected_crc = read_u32_le(data, 12)?;
        let payload = &data[HEADER_SIZE..];

        let expected_len = size
            .checked_mul(size)
            .and_then(|cells| cells.checked_add(2))
            .ok_or_else(|| LoadError::format("snapshot size overflow"))?;
        if payload.len() != expected_len {
            return Err(LoadError::format(format!(
                "snapshot payload length mismatch: expected {expected_len}, got {}",
                payload.len()
            )));
        }

        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            return Err(LoadError::format(format!(
                "CRC32 mismatch: expected {expected_crc:#010x}, got {actual_crc:#010x}"
            )));
        }

        let current_player = Cell::from_code(payload[0])
            .and_then(Cell::colour)
            .ok_or_else(|| LoadError::format(format!("invalid side to move: {}", payload[0])))?;
        let game_won = match payload[1] {
            0 => false,
            1 => true,
            other => return Err(LoadError::format(format!("invalid game-over flag: {other}"))),
        };

        let mut board = Vec::with_capacity(size);
        for row in payload[2..].chunks(size.max(1)).take(size) {
            let cells = row
                .iter()
                .map(|&code| {
                    Cell::from_code(code)
                        .ok_or_else(|| LoadError::format(format!("invalid cell code: {code}")))
                })
                .collect::<Result<Vec<_>, _>>()?;
            board.push(cells);
        }

        Ok(Self {
            board,
            current_player,
            game_won,
        })
    }
}

fn read_u32_le(data: &[u8], offset: usize) -> Result<u32, LoadError> {
    let end = offset + 4;
    let bytes = data
        .get(offset..end)
        .ok_or_else(|| LoadError::format(format!("unexpected EOF at byte {offset}")))?;
    let mut chunk = [0u8; 4];
    chunk.copy_from_slice(bytes);
    Ok(u32::from_le_bytes(chunk))
}
