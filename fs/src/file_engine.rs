// Copyright 2026 The Strata Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use strata_ds::BlockDevice;

use crate::{Cluster, Error, Index, Volume, CLUSTER_SIZE, ENTRIES_PER_INDEX, NULL_CLUSTER};

/// Access mode a [`FileEngine`] was opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Read,
    Write,
    Append,
}

impl Mode {
    fn writable(self) -> bool {
        self != Mode::Read
    }
}

/// The tri-valued end-of-file state from the directory/catalog contract:
/// `NotAtEof` (0), `Empty` (1, an empty file is trivially "at EOF"), and
/// `AtEnd` (2, the cursor sits at `file_size`). A closed handle cannot be
/// observed in Rust — closing consumes the [`FileEngine`] — so the legacy
/// "1 if closed" case has no counterpart here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EofState {
    NotAtEof = 0,
    Empty = 1,
    AtEnd = 2,
}

/// The per-open-file I/O state machine: cursor, size, mode, and two-level
/// index traversal, extension, and truncation over a borrowed [`Volume`].
///
/// `R` is the opaque directory-entry handle the catalog layer supplied at
/// [`FileEngine::open`]; it is handed back, together with the final file
/// size, from [`FileEngine::close`] on a writable handle.
pub struct FileEngine<'v, D: BlockDevice, R> {
    volume: &'v Volume<D>,
    l1: Index<'v, D>,
    dir_ref: R,
    mode: Mode,
    cursor: u64,
    file_size: u64,
}

impl<'v, D: BlockDevice, R> FileEngine<'v, D, R> {
    /// Opens the file rooted at `l1_cluster_no`. In [`Mode::Append`] the
    /// cursor starts at `stored_size` (appending); otherwise it starts at 0.
    pub fn open(
        volume: &'v Volume<D>,
        l1_cluster_no: u32,
        dir_ref: R,
        mode: Mode,
        stored_size: u64,
    ) -> crate::Result<Self> {
        let l1 = Index::acquire(volume.device(), l1_cluster_no)?;
        let cursor = if mode == Mode::Append { stored_size } else { 0 };
        Ok(Self {
            volume,
            l1,
            dir_ref,
            mode,
            cursor,
            file_size: stored_size,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn file_pos(&self) -> u64 {
        self.cursor
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn eof(&self) -> EofState {
        if self.file_size == 0 {
            EofState::Empty
        } else if self.cursor == self.file_size {
            EofState::AtEnd
        } else {
            EofState::NotAtEof
        }
    }

    /// Sets the cursor. Fails iff `position > file_size`.
    pub fn seek(&mut self, position: u64) -> crate::Result<()> {
        if position > self.file_size {
            return Err(Error::OutOfRange(position));
        }
        self.cursor = position;
        Ok(())
    }

    /// Reads up to `buf.len()` bytes starting at the cursor, advancing it by
    /// the number of bytes actually read. Returns `0` at EOF or on an empty
    /// file, without error.
    pub fn read(&mut self, buf: &mut [u8]) -> crate::Result<usize> {
        if buf.is_empty() || self.file_size == 0 || self.cursor == self.file_size {
            return Ok(0);
        }

        let mut bytes_read = 0usize;
        let mut to_read = buf.len();
        let mut offset = (self.cursor % CLUSTER_SIZE as u64) as usize;
        let target = self.cursor / CLUSTER_SIZE as u64;
        let start_i = (target / ENTRIES_PER_INDEX as u64) as usize;
        let mut start_j = (target % ENTRIES_PER_INDEX as u64) as usize;

        if start_i >= ENTRIES_PER_INDEX {
            return Ok(0);
        }

        for i in start_i..ENTRIES_PER_INDEX {
            let l1_entry = self.l1.get(i);
            if l1_entry == NULL_CLUSTER {
                break;
            }
            let l2 = Index::acquire(self.volume.device(), l1_entry)?;

            for j in start_j..ENTRIES_PER_INDEX {
                let l2_entry = l2.get(j);
                if l2_entry == NULL_CLUSTER {
                    return Ok(bytes_read);
                }

                let data = Cluster::acquire(self.volume.device(), l2_entry)?;
                let remaining_in_file = (self.file_size - self.cursor) as usize;
                let n = to_read.min(CLUSTER_SIZE - offset).min(remaining_in_file);
                buf[bytes_read..bytes_read + n]
                    .copy_from_slice(&data.data()[offset..offset + n]);

                bytes_read += n;
                to_read -= n;
                self.cursor += n as u64;
                offset = 0;

                if to_read == 0 || self.cursor == self.file_size {
                    return Ok(bytes_read);
                }
            }
            start_j = 0;
        }

        Ok(bytes_read)
    }

    /// Writes `buf` at the cursor, extending the index/data region on demand.
    ///
    /// Returns `Ok(())` only when every byte of `buf` made it to disk. A
    /// volume that runs out of space (or a file that reaches its maximum
    /// representable size) partway through returns `Err(Error::DiskFull)` —
    /// the legacy write's "0 on any less-than-complete success" contract,
    /// translated to a `Result` instead of a literal sentinel byte. The
    /// bytes that did fit remain persisted, and `file_size`/`file_pos`
    /// reflect exactly how far the write got even though the call reports
    /// failure.
    pub fn write(&mut self, buf: &[u8]) -> crate::Result<()> {
        if !self.mode.writable() {
            return Err(Error::InvalidMode);
        }
        if buf.is_empty() {
            return Ok(());
        }

        let written = self.write_best_effort(buf)?;
        if written < buf.len() {
            return Err(Error::DiskFull);
        }
        Ok(())
    }

    /// Writes as much of `buf` as the volume has room for, returning the
    /// number of bytes actually persisted. Never itself treats a short
    /// write as an error; only a genuine I/O failure propagates.
    fn write_best_effort(&mut self, buf: &[u8]) -> crate::Result<usize> {
        let mut written = 0usize;
        let mut to_write = buf.len();
        let mut offset = (self.cursor % CLUSTER_SIZE as u64) as usize;
        let target = self.cursor / CLUSTER_SIZE as u64;
        let start_i = (target / ENTRIES_PER_INDEX as u64) as usize;
        let mut start_j = (target % ENTRIES_PER_INDEX as u64) as usize;

        for i in start_i..ENTRIES_PER_INDEX {
            if self.l1.get(i) == NULL_CLUSTER {
                let allocated = match self.volume.alloc() {
                    Ok(c) => c,
                    Err(Error::DiskFull) => return Ok(written),
                    Err(err) => return Err(err),
                };
                {
                    let mut cluster = Cluster::acquire(self.volume.device(), allocated)?;
                    cluster.clear();
                }
                self.l1.set(i, allocated);
            }

            let mut l2 = Index::acquire(self.volume.device(), self.l1.get(i))?;

            for j in start_j..ENTRIES_PER_INDEX {
                if l2.get(j) == NULL_CLUSTER {
                    let allocated = match self.volume.alloc() {
                        Ok(c) => c,
                        Err(Error::DiskFull) => return Ok(written),
                        Err(err) => return Err(err),
                    };
                    {
                        let mut cluster = Cluster::acquire(self.volume.device(), allocated)?;
                        cluster.clear();
                    }
                    l2.set(j, allocated);
                }

                let n = to_write.min(CLUSTER_SIZE - offset);
                {
                    let mut data = Cluster::acquire(self.volume.device(), l2.get(j))?;
                    data.data_mut()[offset..offset + n]
                        .copy_from_slice(&buf[written..written + n]);
                }

                let appending = self.cursor == self.file_size;
                written += n;
                to_write -= n;
                self.cursor += n as u64;
                offset = 0;
                if appending {
                    self.file_size += n as u64;
                }

                if to_write == 0 {
                    return Ok(written);
                }
            }
            start_j = 0;
        }

        // Ran off the end of the two-level index: the file has reached its
        // maximum representable size.
        Ok(written)
    }

    /// Drops all data strictly after the cursor, reclaiming every data and
    /// `L2` cluster made fully unreachable (even an `L2` emptied by an
    /// unaligned truncation). The `L1` cluster is never freed.
    pub fn truncate(&mut self) -> crate::Result<()> {
        if !self.mode.writable() {
            return Err(Error::InvalidMode);
        }
        if self.cursor == self.file_size {
            return Err(Error::AlreadyAtEof);
        }

        let first_cluster = self.cursor.div_ceil(CLUSTER_SIZE as u64);
        let last_cluster = (self.file_size - 1) / CLUSTER_SIZE as u64;

        let start_i = (first_cluster / ENTRIES_PER_INDEX as u64) as usize;
        let last_i = (last_cluster / ENTRIES_PER_INDEX as u64) as usize;
        let mut start_j = (first_cluster % ENTRIES_PER_INDEX as u64) as usize;

        for i in start_i..=last_i {
            let l1_entry = self.l1.get(i);
            if l1_entry == NULL_CLUSTER {
                return Err(Error::OutOfRange(i as u64));
            }

            let mut l2 = Index::acquire(self.volume.device(), l1_entry)?;
            let end_j = if i == last_i {
                (last_cluster % ENTRIES_PER_INDEX as u64) as usize + 1
            } else {
                ENTRIES_PER_INDEX
            };

            for j in start_j..end_j {
                let data_cluster = l2.get(j);
                if data_cluster == NULL_CLUSTER {
                    return Err(Error::OutOfRange(j as u64));
                }
                self.volume.free(data_cluster)?;
                l2.set(j, NULL_CLUSTER);
            }

            if l2.is_empty() {
                self.volume.free(l1_entry)?;
                self.l1.set(i, NULL_CLUSTER);
            }

            start_j = 0;
        }

        self.file_size = self.cursor;
        Ok(())
    }

    /// Flushes `L1` and, on a writable handle, hands the final size back to
    /// the directory layer alongside the caller's opaque `dir_ref`.
    ///
    /// Consuming `self` is this implementation's translation of the source's
    /// runtime "closed" flag: once a `FileEngine` is closed there is no
    /// value left through which a further operation could even be attempted.
    pub fn close(self) -> Option<(R, u64)> {
        let file_size = self.file_size;
        let writable = self.mode.writable();
        let dir_ref = self.dir_ref;
        // `self.l1` drops here, flushing the first-level index.
        if writable {
            Some((dir_ref, file_size))
        } else {
            None
        }
    }
}
