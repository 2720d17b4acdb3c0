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

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("storage I/O failure: {0}")]
    StorageIo(#[from] std::io::Error),
    #[error("{0} is out of range")]
    OutOfRange(u64),
    #[error("disk full")]
    DiskFull,
    #[error("operation not valid in this mode")]
    InvalidMode,
    #[error("handle is closed")]
    Closed,
    #[error("already at end of file")]
    AlreadyAtEof,
}

pub type Result<T> = std::result::Result<T, Error>;
