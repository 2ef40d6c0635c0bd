/* ************************************************************************ **
** This file is part of lupfit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Everything between the command line and the numerical crates.

#[macro_use] extern crate log;
#[macro_use] extern crate serde_derive;
#[macro_use] extern crate failure;
#[cfg(test)]
#[macro_use] extern crate lupfit_assert_close;

pub type FailResult<T> = Result<T, ::failure::Error>;

pub mod config;
pub mod input;
pub mod entry_points;
mod cmd;

mod ui {
    pub mod logging;
}
