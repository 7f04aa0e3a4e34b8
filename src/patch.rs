//! In-place rewrite of the cpu subtype field.
//!
//! Only the header at offset 0 is ever written and it is written back whole, so every
//! byte except `cpu_sub_type` stays as it was and the file never changes size.

use crate::{
    error::{Error, Result},
    header::MachHeader,
};
use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::Path,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Patched { previous: u32, header: MachHeader },
    NotArm { header: MachHeader },
}

pub struct Patcher<F> {
    file: F,
    header: MachHeader,
}

impl Patcher<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(|source| Error::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Self::load(file)
    }
}

impl<F: Read + Write + Seek> Patcher<F> {
    /// Reads the header at the start of `file` and checks its magic.
    pub fn load(mut file: F) -> Result<Self> {
        let mut buf = [0u8; MachHeader::SIZE];
        file.seek(SeekFrom::Start(0)).map_err(Error::Read)?;
        file.read_exact(&mut buf).map_err(Error::Read)?;

        let header = MachHeader::decode(&buf)?;
        if !header.has_valid_magic() {
            return Err(Error::InvalidMagic(header.magic));
        }

        Ok(Self { file, header })
    }

    pub fn header(&self) -> &MachHeader {
        &self.header
    }

    /// Writes `cpu_sub_type` back to the file, but only for ARM headers.
    pub fn set_cpu_subtype(&mut self, cpu_sub_type: u32) -> Result<Outcome> {
        if !self.header.is_arm() {
            return Ok(Outcome::NotArm {
                header: self.header,
            });
        }

        let previous = self.header.cpu_sub_type;
        let mut patched = self.header;
        patched.cpu_sub_type = cpu_sub_type;

        self.file.seek(SeekFrom::Start(0)).map_err(Error::Write)?;
        self.file
            .write_all(&patched.encode())
            .map_err(Error::Write)?;
        self.file.flush().map_err(Error::Write)?;

        self.header = patched;
        Ok(Outcome::Patched {
            previous,
            header: patched,
        })
    }

    #[cfg(test)]
    pub fn into_inner(self) -> F {
        self.file
    }
}
