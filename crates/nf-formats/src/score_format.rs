//! The `.nfs` score container.
//!
//! Layout (big-endian): `NFSC` magic, u16 version, 32-byte NUL-padded
//! title, then four columns in priority order, each four u64 words in
//! the score's MSB-first step convention. The words can be pasted
//! straight into hardware constants.

use binrw::io::Cursor;
use binrw::{binrw, BinRead, BinWrite};
use nf_score::{Column, Score, Track};

use crate::FormatError;

/// Current container version.
pub const FORMAT_VERSION: u16 = 1;

#[binrw]
#[brw(big, magic = b"NFSC")]
struct ScoreFile {
    version: u16,
    title: [u8; 32],
    tracks: [[u64; 4]; 4],
}

/// Load a score from container bytes.
pub fn load_score(data: &[u8]) -> Result<Score, FormatError> {
    let file = ScoreFile::read(&mut Cursor::new(data))?;
    if file.version != FORMAT_VERSION {
        return Err(FormatError::UnsupportedVersion);
    }

    let mut score = Score::new(&parse_title(&file.title));
    for column in Column::ALL {
        *score.track_mut(column) = Track::from_words(file.tracks[column.index()]);
    }
    Ok(score)
}

/// Serialize a score into container bytes.
pub fn save_score(score: &Score) -> Vec<u8> {
    let mut title = [0u8; 32];
    let bytes = score.title.as_bytes();
    title[..bytes.len()].copy_from_slice(bytes);

    let mut tracks = [[0u64; 4]; 4];
    for column in Column::ALL {
        tracks[column.index()] = score.track(column).words();
    }

    let file = ScoreFile {
        version: FORMAT_VERSION,
        title,
        tracks,
    };
    let mut cursor = Cursor::new(Vec::new());
    file.write(&mut cursor).expect("Vec<u8> write cannot fail");
    cursor.into_inner()
}

/// Trim a NUL-padded title field.
fn parse_title(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).trim().to_string()
}

impl From<binrw::Error> for FormatError {
    fn from(err: binrw::Error) -> Self {
        match err {
            binrw::Error::BadMagic { .. } => FormatError::InvalidHeader,
            binrw::Error::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                FormatError::UnexpectedEof
            }
            other => FormatError::Io(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_round_trips() {
        let score = Score::builtin();
        let bytes = save_score(&score);
        let loaded = load_score(&bytes).unwrap();
        assert_eq!(loaded, score);
        assert_eq!(loaded.title.as_str(), "Overclocked");
    }

    #[test]
    fn words_are_stored_big_endian_after_the_header() {
        let bytes = save_score(&Score::builtin());
        // magic(4) + version(2) + title(32), then green word 0
        let word = u64::from_be_bytes(bytes[38..46].try_into().unwrap());
        assert_eq!(word, Score::builtin().track(Column::Green).words()[0]);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = save_score(&Score::builtin());
        bytes[0] = b'X';
        assert!(matches!(
            load_score(&bytes),
            Err(FormatError::InvalidHeader)
        ));
    }

    #[test]
    fn rejects_truncated_data() {
        let bytes = save_score(&Score::builtin());
        assert!(matches!(
            load_score(&bytes[..bytes.len() / 2]),
            Err(FormatError::UnexpectedEof)
        ));
    }

    #[test]
    fn rejects_future_versions() {
        let mut bytes = save_score(&Score::builtin());
        // version field sits right after the magic
        bytes[4] = 0xFF;
        assert!(matches!(
            load_score(&bytes),
            Err(FormatError::UnsupportedVersion)
        ));
    }

    #[test]
    fn short_titles_survive_the_padding() {
        let score = Score::new("nf");
        let loaded = load_score(&save_score(&score)).unwrap();
        assert_eq!(loaded.title.as_str(), "nf");
    }
}
