// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! ANSI colors for operator-visible output.

use std::fmt::{Debug, Display};

pub const GREY: &str = "\x1b[0;90m";
pub const LAVENDER: &str = "\x1b[38;5;183;1m";
pub const MINT: &str = "\x1b[38;5;48;1m";
pub const PINK: &str = "\x1b[38;5;161;1m";
pub const RED: &str = "\x1b[31;1m";
pub const YELLOW: &str = "\x1b[33;1m";
pub const RESET: &str = "\x1b[0;0m";

pub trait Color {
    fn grey(&self) -> String;
    fn lavender(&self) -> String;
    fn mint(&self) -> String;
    fn pink(&self) -> String;
    fn red(&self) -> String;
    fn yellow(&self) -> String;
}

macro_rules! colors {
    ($($method:ident => $color:ident),* $(,)?) => {
        impl<T: Display> Color for T {
            $(
                fn $method(&self) -> String {
                    format!("{}{self}{RESET}", $color)
                }
            )*
        }
    };
}

macro_rules! debug_colors {
    ($($method:ident => $color:ident),* $(,)?) => {
        impl<T: Debug> DebugColor for T {
            $(
                fn $method(&self) -> String {
                    format!("{}{self:?}{RESET}", $color)
                }
            )*
        }
    };
}

colors! {
    grey => GREY,
    lavender => LAVENDER,
    mint => MINT,
    pink => PINK,
    red => RED,
    yellow => YELLOW,
}

pub trait DebugColor {
    fn debug_grey(&self) -> String;
    fn debug_lavender(&self) -> String;
    fn debug_red(&self) -> String;
}

debug_colors! {
    debug_grey => GREY,
    debug_lavender => LAVENDER,
    debug_red => RED,
}
