//! Implements parsing for [`mk_node::Args`] structure.

use crate::parser::nfsv3::create::new_attr;
use crate::parser::nfsv3::{file, MAX_FILENAME};
use crate::parser::primitive::{string_max_size, u32};
use crate::parser::{Error, Result};
use crate::vfs::file::Device;
use crate::vfs::mk_node;
use crate::vfs::mk_node::What;
use std::io::Read;

fn what(src: &mut impl Read) -> Result<mk_node::What> {
    match u32(src)? {
        3 => Ok(What::Block(new_attr(src)?, Device { major: u32(src)?, minor: u32(src)? })),
        4 => Ok(What::Char(new_attr(src)?, Device { major: u32(src)?, minor: u32(src)? })),
        6 => Ok(What::Socket(new_attr(src)?)),
        7 => Ok(What::Fifo(new_attr(src)?)),
        _ => Err(Error::EnumDiscMismatch),
    }
}

/// Parses the arguments for an NFSv3 `MKNOD` operation from the provided `Read` source.
pub fn args(src: &mut impl Read) -> Result<mk_node::Args> {
    Ok(mk_node::Args {
        dir: file::handle(src)?,
        name: string_max_size(src, MAX_FILENAME)?,
        what: what(src)?,
    })
}
