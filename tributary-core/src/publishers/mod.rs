// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cold publishers built directly on the demand protocol.

mod empty;
mod fail;
mod just;
mod sequence;

pub use empty::Empty;
pub use fail::Fail;
pub use just::Just;
pub use sequence::Sequence;
