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

use std::cell::RefCell;

use log::info;
use strata_ds::BlockDevice;

use crate::{BitVector, Cluster, Error};

/// A device plus its free-space bitmap and the root directory's `L1`.
///
/// `Volume` does not track per-open-file state: [`crate::FileEngine`]
/// instances borrow a `Volume` for their lifetime rather than owning one,
/// so the volume is expected to outlive every file opened against it.
pub struct Volume<D: BlockDevice> {
    device: D,
    bitmap: RefCell<BitVector>,
    root_l1_cluster_no: u32,
}

impl<D: BlockDevice> Volume<D> {
    /// Lays out a fresh bitmap (occupying its own clusters plus the root
    /// `L1`) and zero-initializes the root directory's `L1` index.
    pub fn format(device: D) -> crate::Result<Self> {
        let root_l1_cluster_no = BitVector::storage_clusters_for(device.num_clusters());
        let bitmap = BitVector::format(&device, root_l1_cluster_no)?;
        {
            let mut root_l1 = Cluster::acquire(&device, root_l1_cluster_no)?;
            root_l1.clear();
        }
        info!(
            "formatted volume: {} clusters, root L1 at cluster {root_l1_cluster_no}",
            device.num_clusters()
        );
        Ok(Self {
            device,
            bitmap: RefCell::new(bitmap),
            root_l1_cluster_no,
        })
    }

    /// Mounts an already-formatted device, reading its bitmap back into memory.
    pub fn open(device: D) -> crate::Result<Self> {
        let root_l1_cluster_no = BitVector::storage_clusters_for(device.num_clusters());
        let bitmap = BitVector::load(&device)?;
        Ok(Self {
            device,
            bitmap: RefCell::new(bitmap),
            root_l1_cluster_no,
        })
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Cluster number of the root directory's first-level index: `B`.
    pub fn root_l1_cluster_no(&self) -> u32 {
        self.root_l1_cluster_no
    }

    pub fn get_cluster(&self, cluster_no: u32) -> crate::Result<Cluster<D>> {
        if cluster_no >= self.device.num_clusters() {
            return Err(Error::OutOfRange(cluster_no as u64));
        }
        Cluster::acquire(&self.device, cluster_no)
    }

    /// Allocates and occupies a free cluster, or `Err(DiskFull)` if none remain.
    pub fn alloc(&self) -> crate::Result<u32> {
        let mut bitmap = self.bitmap.borrow_mut();
        let free = bitmap.find_free();
        if free == crate::NULL_CLUSTER {
            return Err(Error::DiskFull);
        }
        bitmap.occupy(&self.device, free)?;
        Ok(free)
    }

    /// Returns a cluster to the free pool. Never applied to a bitmap cluster.
    pub fn free(&self, cluster_no: u32) -> crate::Result<()> {
        self.bitmap.borrow_mut().make_free(&self.device, cluster_no)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::MemoryBlockDevice;

    use super::*;

    #[test]
    fn format_places_root_l1_right_after_the_bitmap() {
        let volume = Volume::format(MemoryBlockDevice::new(16)).unwrap();
        assert_eq!(volume.root_l1_cluster_no(), 1);
        let root_l1 = volume.get_cluster(1).unwrap();
        assert!(root_l1.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn alloc_skips_reserved_clusters_and_reports_disk_full() {
        let volume = Volume::format(MemoryBlockDevice::new(4)).unwrap();
        // clusters 0 (bitmap) and 1 (root L1) reserved, 2 and 3 free.
        let a = volume.alloc().unwrap();
        let b = volume.alloc().unwrap();
        assert_ne!(a, b);
        assert!(a >= 2 && b >= 2);
        assert!(matches!(volume.alloc(), Err(Error::DiskFull)));
        volume.free(a).unwrap();
        assert_eq!(volume.alloc().unwrap(), a);
    }

    #[test]
    fn get_cluster_rejects_out_of_range() {
        let volume = Volume::format(MemoryBlockDevice::new(4)).unwrap();
        assert!(matches!(
            volume.get_cluster(4),
            Err(Error::OutOfRange(4))
        ));
    }
}
