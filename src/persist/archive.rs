//! Checksummed multi-member container used for model files.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! magic "TXCA" | u16 container version | u16 member count
//! per member: u16 name length | name bytes | u64 data length | u32 CRC32 | data
//! ```
//!
//! Files are written to a sibling temporary file and renamed into place, so a
//! failed write never leaves a half-written model behind.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{ClassifierError, Result};

/// File signature.
pub const MAGIC: &[u8; 4] = b"TXCA";

/// Current container layout version.
pub const CONTAINER_VERSION: u16 = 1;

/// A named blob inside an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub data: Vec<u8>,
}

/// An ordered set of named members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    members: Vec<Member>,
}

impl Archive {
    /// Create an empty archive.
    pub fn new() -> Self {
        Archive::default()
    }

    /// Append a member. Names must be unique and fit in a u16 length.
    pub fn add<S: Into<String>>(&mut self, name: S, data: Vec<u8>) -> Result<()> {
        let name = name.into();
        if name.is_empty() || name.len() > u16::MAX as usize {
            return Err(ClassifierError::invalid_argument(format!(
                "invalid archive member name length: {}",
                name.len()
            )));
        }
        if self.member(&name).is_some() {
            return Err(ClassifierError::invalid_argument(format!(
                "duplicate archive member: {name}"
            )));
        }
        if self.members.len() == u16::MAX as usize {
            return Err(ClassifierError::invalid_argument("too many archive members"));
        }
        self.members.push(Member { name, data });
        Ok(())
    }

    /// Data of the member called `name`.
    pub fn member(&self, name: &str) -> Option<&[u8]> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.data.as_slice())
    }

    /// Data of the member called `name`, or a storage error if it is absent.
    pub fn require(&self, name: &str) -> Result<&[u8]> {
        self.member(name)
            .ok_or_else(|| ClassifierError::storage(format!("archive has no member {name}")))
    }

    /// Member names in archive order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the archive has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Encode the archive into `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(MAGIC)?;
        writer.write_u16::<LittleEndian>(CONTAINER_VERSION)?;
        writer.write_u16::<LittleEndian>(self.members.len() as u16)?;

        for member in &self.members {
            writer.write_u16::<LittleEndian>(member.name.len() as u16)?;
            writer.write_all(member.name.as_bytes())?;
            writer.write_u64::<LittleEndian>(member.data.len() as u64)?;
            writer.write_u32::<LittleEndian>(crc32fast::hash(&member.data))?;
            writer.write_all(&member.data)?;
        }
        Ok(())
    }

    /// Decode an archive from `reader`.
    ///
    /// # Errors
    ///
    /// [`ClassifierError::Storage`] for a bad signature, an unknown container
    /// version, truncated input, a checksum mismatch or trailing bytes.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic).map_err(truncated)?;
        if &magic != MAGIC {
            return Err(ClassifierError::storage("not a model archive (bad magic)"));
        }

        let version = reader.read_u16::<LittleEndian>().map_err(truncated)?;
        if version != CONTAINER_VERSION {
            return Err(ClassifierError::storage(format!(
                "unsupported container version {version}"
            )));
        }

        let count = reader.read_u16::<LittleEndian>().map_err(truncated)?;
        let mut archive = Archive::new();
        for _ in 0..count {
            let name_len = reader.read_u16::<LittleEndian>().map_err(truncated)?;
            let mut name = vec![0u8; name_len as usize];
            reader.read_exact(&mut name).map_err(truncated)?;
            let name = String::from_utf8(name)
                .map_err(|_| ClassifierError::storage("archive member name is not UTF-8"))?;

            let data_len = reader.read_u64::<LittleEndian>().map_err(truncated)?;
            let checksum = reader.read_u32::<LittleEndian>().map_err(truncated)?;

            let mut data = Vec::new();
            reader.by_ref().take(data_len).read_to_end(&mut data)?;
            if data.len() as u64 != data_len {
                return Err(ClassifierError::storage(format!(
                    "member {name} truncated: expected {data_len} bytes, got {}",
                    data.len()
                )));
            }
            if crc32fast::hash(&data) != checksum {
                return Err(ClassifierError::storage(format!(
                    "checksum mismatch in member {name}"
                )));
            }

            archive.add(name, data).map_err(|e| ClassifierError::storage(e.to_string()))?;
        }

        let mut trailing = [0u8; 1];
        if reader.read(&mut trailing)? != 0 {
            return Err(ClassifierError::storage("trailing data after last member"));
        }

        Ok(archive)
    }

    /// Write the archive to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let tmp = temp_path(path);

        if let Err(e) = self.write_file(&tmp) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        fs::rename(&tmp, path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            ClassifierError::file(path, e)
        })
    }

    fn write_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| ClassifierError::file(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        let file = writer
            .into_inner()
            .map_err(|e| ClassifierError::file(path, e.into_error()))?;
        file.sync_all().map_err(|e| ClassifierError::file(path, e))?;
        Ok(())
    }

    /// Read an archive from `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ClassifierError::file(path, e))?;
        let mut reader = BufReader::new(file);
        Archive::read_from(&mut reader)
    }
}

fn truncated(e: io::Error) -> ClassifierError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        ClassifierError::storage("archive is truncated")
    } else {
        ClassifierError::Io(e)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> Archive {
        let mut archive = Archive::new();
        archive.add("meta.txt", b"format=1\n".to_vec()).unwrap();
        archive.add("model.bin", vec![0, 1, 2, 3, 255]).unwrap();
        archive
    }

    fn encode(archive: &Archive) -> Vec<u8> {
        let mut buffer = Vec::new();
        archive.write_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn test_layout_header() {
        let bytes = encode(&sample());
        assert_eq!(&bytes[..4], MAGIC);
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), CONTAINER_VERSION);
        assert_eq!(u16::from_le_bytes([bytes[6], bytes[7]]), 2);
    }

    #[test]
    fn test_read_back() {
        let bytes = encode(&sample());
        let archive = Archive::read_from(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(archive, sample());
        assert_eq!(archive.require("model.bin").unwrap(), &[0, 1, 2, 3, 255]);
        assert_eq!(archive.names().collect::<Vec<_>>(), vec!["meta.txt", "model.bin"]);
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = encode(&sample());
        bytes[0] = b'X';
        let err = Archive::read_from(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, ClassifierError::Storage(_)));
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut bytes = encode(&sample());
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        let err = Archive::read_from(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, ClassifierError::Storage(msg) if msg.contains("checksum")));
    }

    #[test]
    fn test_truncated() {
        let bytes = encode(&sample());
        for cut in [2, 7, 12, bytes.len() - 2] {
            let err = Archive::read_from(&mut Cursor::new(&bytes[..cut])).unwrap_err();
            assert!(matches!(err, ClassifierError::Storage(_)), "cut at {cut}");
        }
    }

    #[test]
    fn test_trailing_data() {
        let mut bytes = encode(&sample());
        bytes.push(0);
        assert!(Archive::read_from(&mut Cursor::new(bytes)).is_err());
    }

    #[test]
    fn test_missing_member() {
        let archive = Archive::new();
        assert!(matches!(
            archive.require("model.bin"),
            Err(ClassifierError::Storage(_))
        ));
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let mut archive = sample();
        assert!(archive.add("meta.txt", Vec::new()).is_err());
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_save_and_open() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("model.txc");

        sample().save(&path).unwrap();
        assert!(!temp_path(&path).exists());
        assert_eq!(Archive::open(&path).unwrap(), sample());
    }

    #[test]
    fn test_open_missing_file() {
        let err = Archive::open("/definitely/not/here.txc").unwrap_err();
        assert!(matches!(err, ClassifierError::File { .. }));
    }
}
