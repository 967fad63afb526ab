//! Core library for the comment round backend.
//!
//! The modules keep responsibilities narrow: the domain records live in
//! [`yti::comments::model`], thread trees and result tallies in
//! [`yti::comments::tree`] and [`yti::comments::results`], the workbook layout
//! in [`yti::comments::export`], file adapters under [`yti::comments::io`],
//! and the API operations in [`yti::comments::service`]. Persistence, user
//! lookup and message catalogs sit behind traits so the aggregation and export
//! logic can run against in-memory collaborators.

pub mod yti;

pub use yti::comments::{
    CommentsError, Result, config, error, export, ids, io, localization, model, pipeline, results,
    service, store, tree, urls, users,
};
