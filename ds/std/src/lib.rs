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

use std::{
    fs::{File, OpenOptions},
    os::unix::fs::FileExt,
    path::Path,
};

use log::error;
use strata_ds::{BlockDevice, Error, Result};

/// A [`BlockDevice`] backed by a regular file, addressed in fixed-size
/// clusters via positioned reads/writes so no `&mut self` is ever needed.
pub struct FileBlockDevice {
    file: File,
    cluster_size: u32,
    num_clusters: u32,
}

impl FileBlockDevice {
    /// Creates (or truncates) a file of exactly `num_clusters * cluster_size`
    /// bytes and opens it as a block device.
    pub fn create<P: AsRef<Path>>(path: P, cluster_size: u32, num_clusters: u32) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(cluster_size as u64 * num_clusters as u64)?;
        Ok(Self {
            file,
            cluster_size,
            num_clusters,
        })
    }

    /// Opens an existing file as a block device, deriving the cluster count
    /// from the file length.
    pub fn open<P: AsRef<Path>>(path: P, cluster_size: u32) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let len = file.metadata()?.len();
        let num_clusters = (len / cluster_size as u64) as u32;
        Ok(Self {
            file,
            cluster_size,
            num_clusters,
        })
    }

    fn check_range(&self, cluster_no: u32) -> Result<()> {
        if cluster_no >= self.num_clusters {
            return Err(Error::OutOfRange(cluster_no as u64));
        }
        Ok(())
    }
}

impl BlockDevice for FileBlockDevice {
    fn num_clusters(&self) -> u32 {
        self.num_clusters
    }

    fn read_cluster(&self, cluster_no: u32, buffer: &mut [u8]) -> Result<()> {
        self.check_range(cluster_no)?;
        let offset = cluster_no as u64 * self.cluster_size as u64;
        self.file.read_exact_at(buffer, offset).map_err(|err| {
            error!("failed to read cluster {cluster_no}: {err}");
            Error::StorageIo(err)
        })
    }

    fn write_cluster(&self, cluster_no: u32, buffer: &[u8]) -> Result<()> {
        self.check_range(cluster_no)?;
        let offset = cluster_no as u64 * self.cluster_size as u64;
        self.file.write_all_at(buffer, offset).map_err(|err| {
            error!("failed to write cluster {cluster_no}: {err}");
            Error::StorageIo(err)
        })
    }
}
