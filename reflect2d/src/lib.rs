//! Geometry of flat mirrors in the plane: where things appear to be when seen
//! through mirrors, and where light goes when it bounces off them.

use std::{rc::Rc, sync::Arc};

pub use nalgebra;

use nalgebra::{Matrix2, Point2, Vector2};

mod config;
mod error;
mod mirror;

pub mod images;
pub mod intersection;
pub mod reflection;
pub mod scene;
pub mod sight;
pub mod trace;
pub mod vector;

pub use config::*;
pub use error::*;
pub use images::*;
pub use intersection::*;
pub use mirror::*;
pub use reflection::*;
pub use scene::*;
pub use sight::*;
pub use trace::*;
pub use vector::*;

pub type Float = f64;

/// Anything made of [`Mirror`]s.
///
/// Implemented for single mirrors, and for most collections of types implementing
/// this trait, tuples included, so that scenes can mix, say, a fixed array of walls
/// with a `Vec` of user-placed mirrors.
#[impl_trait_for_tuples::impl_for_tuples(1, 16)]
pub trait MirrorSet {
    /// Calls `f` on every mirror in this set.
    ///
    /// Implementors must always visit the same mirrors, in the same order.
    fn visit_mirrors(&self, f: &mut dyn FnMut(&Mirror));
}

impl MirrorSet for Mirror {
    #[inline]
    fn visit_mirrors(&self, f: &mut dyn FnMut(&Mirror)) {
        f(self);
    }
}

impl<T: MirrorSet> MirrorSet for [T] {
    #[inline]
    fn visit_mirrors(&self, f: &mut dyn FnMut(&Mirror)) {
        self.iter().for_each(|mirror| mirror.visit_mirrors(f));
    }
}

impl<const N: usize, T: MirrorSet> MirrorSet for [T; N] {
    #[inline]
    fn visit_mirrors(&self, f: &mut dyn FnMut(&Mirror)) {
        self.as_slice().visit_mirrors(f);
    }
}

// It's clear that all these impls use the `Deref` trait, but writing a blanket impl over all types implementing `Deref`
// makes it impossible to implement it for new types downstream.

impl<T: MirrorSet + ?Sized> MirrorSet for Box<T> {
    #[inline]
    fn visit_mirrors(&self, f: &mut dyn FnMut(&Mirror)) {
        self.as_ref().visit_mirrors(f);
    }
}

impl<T: MirrorSet + ?Sized> MirrorSet for Arc<T> {
    #[inline]
    fn visit_mirrors(&self, f: &mut dyn FnMut(&Mirror)) {
        self.as_ref().visit_mirrors(f);
    }
}

impl<T: MirrorSet + ?Sized> MirrorSet for Rc<T> {
    #[inline]
    fn visit_mirrors(&self, f: &mut dyn FnMut(&Mirror)) {
        self.as_ref().visit_mirrors(f);
    }
}

impl<T: MirrorSet> MirrorSet for Vec<T> {
    #[inline]
    fn visit_mirrors(&self, f: &mut dyn FnMut(&Mirror)) {
        self.as_slice().visit_mirrors(f);
    }
}

impl<T: MirrorSet + ?Sized> MirrorSet for &T {
    #[inline]
    fn visit_mirrors(&self, f: &mut dyn FnMut(&Mirror)) {
        (**self).visit_mirrors(f);
    }
}

impl<T: MirrorSet + ?Sized> MirrorSet for &mut T {
    #[inline]
    fn visit_mirrors(&self, f: &mut dyn FnMut(&Mirror)) {
        (**self).visit_mirrors(f);
    }
}

/// Every mirror in `mirrors`, in visiting order.
#[must_use]
pub fn mirror_list(mirrors: &(impl MirrorSet + ?Sized)) -> Vec<Mirror> {
    let mut list = Vec::new();
    mirrors.visit_mirrors(&mut |mirror: &Mirror| list.push(*mirror));
    list
}
