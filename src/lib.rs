//! Touch gesture classification.
//!
//! [`TouchGestureListener`] turns a stream of [`PointerEvent`]s into single
//! tap, long-press, drag and fling, double-tap and two-pointer gestures, and
//! reports each one to the registered [`OnDetectSingle`], [`OnDetectDouble`]
//! and [`OnDetectMulti`] observers.

pub mod config;
pub mod geometry;
pub mod observer;
pub mod pointer;
pub mod timer;

mod detector;
mod listener;

pub use config::{ConfigError, GestureConfig};
pub use listener::{Mode, TouchGestureListener};
pub use observer::{LogObserver, OnDetectDouble, OnDetectMulti, OnDetectSingle};
pub use pointer::{Point, PointerEvent, PointerPhase};
