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

pub use strata_err::*;

/// A fixed-geometry, cluster-addressed block store.
///
/// Implementations are expected to perform synchronous, positioned I/O so
/// that reading or writing a cluster never requires an exclusive borrow of
/// the device.
pub trait BlockDevice {
    fn num_clusters(&self) -> u32;

    fn read_cluster(&self, cluster_no: u32, buffer: &mut [u8]) -> Result<()>;

    fn write_cluster(&self, cluster_no: u32, buffer: &[u8]) -> Result<()>;
}
