//! Report serializers: pure projections of an immutable [`crate::models::Report`].
//!
//! Each serializer may be invoked any number of times against the same
//! report instance; none of them mutate it.

pub mod csv;
pub mod html;
pub mod json;
pub mod text;
