//! `GAME`: weather and moon state.

use morrowsave_common::{ChunkReader, Tag};

use crate::{Error, Result};

/// `GMDT` of saves made without the secunda phase field.
pub const GMDT_SIZE_SHORT: usize = 92;
/// `GMDT` with the secunda phase.
pub const GMDT_SIZE_LONG: usize = 96;

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub cell_name: String,
    pub fog_colour: f32,
    pub fog_density: f32,
    pub current_weather: i32,
    pub next_weather: i32,
    /// Percentage of the transition done, masked to the low byte.
    pub weather_transition: i32,
    pub time_of_next_transition: f32,
    pub masser_phase: i32,
    pub secunda_phase: i32,
}

impl GameState {
    pub fn load(reader: &mut ChunkReader<'_>) -> Result<Self> {
        reader.expect_sub(b"GMDT")?;
        let size = reader.sub_header()?;
        if size != GMDT_SIZE_SHORT && size != GMDT_SIZE_LONG {
            return Err(Error::UnexpectedSize {
                record: Tag::new(b"GAME"),
                tag: Tag::new(b"GMDT"),
                size,
            });
        }

        let cell_name = reader.read_string(64)?;
        let fog_colour = reader.read_f32()?;
        let fog_density = reader.read_f32()?;
        let current_weather = reader.read_i32()?;
        let next_weather = reader.read_i32()?;
        let weather_transition = reader.read_i32()? & 0xff;
        let time_of_next_transition = reader.read_f32()?;
        let masser_phase = reader.read_i32()? & 0xff;
        let secunda_phase = if size == GMDT_SIZE_LONG {
            reader.read_i32()? & 0xff
        } else {
            0
        };

        Ok(GameState {
            cell_name,
            fog_colour,
            fog_density,
            current_weather,
            next_weather,
            weather_transition,
            time_of_next_transition,
            masser_phase,
            secunda_phase,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morrowsave_common::{ChunkWriter, Encoding};

    fn gmdt(with_secunda: bool) -> Vec<u8> {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"GAME").unwrap();
        writer.start_sub(b"GMDT").unwrap();
        writer.write_fixed_string("Balmora", 64).unwrap();
        writer.write_f32(0.5).unwrap();
        writer.write_f32(0.25).unwrap();
        writer.write_i32(4).unwrap();
        writer.write_i32(5).unwrap();
        writer.write_i32(0x1234_5640).unwrap();
        writer.write_f32(3.0).unwrap();
        writer.write_i32(0x0102).unwrap();
        if with_secunda {
            writer.write_i32(0x0307).unwrap();
        }
        writer.end_sub().unwrap();
        writer.end_record(b"GAME").unwrap();
        writer.into_inner().unwrap()
    }

    fn load(data: &[u8]) -> Result<GameState> {
        let mut reader = ChunkReader::new(data, Encoding::Win1252);
        reader.next_record_name().unwrap();
        reader.record_header().unwrap();
        GameState::load(&mut reader)
    }

    #[test]
    fn test_both_sizes() {
        let short = load(&gmdt(false)).unwrap();
        assert_eq!(short.cell_name, "Balmora");
        assert_eq!(short.current_weather, 4);
        assert_eq!(short.next_weather, 5);
        assert_eq!(short.weather_transition, 0x40);
        assert_eq!(short.masser_phase, 0x02);
        assert_eq!(short.secunda_phase, 0);

        let long = load(&gmdt(true)).unwrap();
        assert_eq!(long.secunda_phase, 0x07);
    }

    #[test]
    fn test_unknown_size_is_error() {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.start_record(b"GAME").unwrap();
        writer.write_hn_bytes(b"GMDT", &[0; 88]).unwrap();
        writer.end_record(b"GAME").unwrap();
        let data = writer.into_inner().unwrap();

        let err = load(&data).unwrap_err();
        assert!(matches!(err, Error::UnexpectedSize { size: 88, .. }));
    }
}
