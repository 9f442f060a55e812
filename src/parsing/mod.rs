//! Parsers for headers, alignment records and sequence dictionaries.
//!
//! - **Header text**: `@HD`, `@SQ`, `@PG`, `@RG` and `@CO` records into a
//!   [`HeaderModel`](crate::core::header::HeaderModel)
//! - **SAM/BAM files**: header extraction, BAM decoded through noodles
//! - **Alignment records**: SAM text lines or BAM records
//! - **FASTA**: sequence names, lengths and MD5s, plain or gzipped
//! - **Dictionaries**: name -> length from `.dict`/SAM headers or `.fai` files
//!
//! ## Example
//!
//! ```rust
//! use align_probe::parsing::header::parse_header_text;
//! use align_probe::core::types::SortOrder;
//!
//! let header = parse_header_text("@HD\tVN:1.0\tSO:coordinate\n@SQ\tSN:chr1\tLN:1000\n").unwrap();
//! assert_eq!(header.sort_order, SortOrder::Coordinate);
//! assert_eq!(header.sequences()[0].name, "chr1");
//! ```
//!
//! ## Supported `@SQ` Tags
//!
//! | Tag | Description | Required |
//! |-----|-------------|----------|
//! | SN  | Sequence name | Yes |
//! | LN  | Sequence length | Yes |
//! | M5  | MD5 checksum | No |
//! | UR  | URI for sequence | No |
//! | AS  | Assembly identifier | No |
//! | SP  | Species | No |
//! | AN  | Alternate names (aliases) | No |

pub mod dict;
pub mod fai;
pub mod fasta;
pub mod header;
pub mod record;
pub mod sam;
