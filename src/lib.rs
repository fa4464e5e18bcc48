//! # reflect-registrar
//!
//! Build-time registration of Java classes for runtime reflection.
//!
//! ## Architecture
//!
//! - **registrar**: Marker annotation scan and nested-class registration walk
//! - **model**: Annotation occurrences, parameter literals, and registration records
//! - **index**: Annotation index trait and its JSON document form
//! - **source_index**: Annotation indexer for Java sources using tree-sitter
//! - **resolver**: Nested-class lookup trait, in-memory resolver, and resolver chain
//! - **classpath**: Nested-class lookup over jars and class directories
//! - **cache**: Persistent jar catalog using LMDB via heed
//! - **scan**: Source, jar, and class file discovery
//! - **output**: Scan report rendering
//! - **logging**: Tracing subscriber setup

pub mod cache;
pub mod classpath;
pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod model;
pub mod output;
pub mod registrar;
pub mod resolver;
pub mod scan;
pub mod source_index;
