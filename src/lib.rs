//! # rpc-typegen
//!
//! Generate a typed RPC client and an HTTP router from a directory of
//! TypeScript handler functions.
//!
//! Every module under the entry directory that default-exports a named async
//! function becomes one `POST` endpoint. The handler's parameter and return
//! types are read from the source and copied into the client, so frontend and
//! backend share one contract without a hand-written schema.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write rpc-typegen.json and generate once
//! rpc-typegen init
//!
//! # Regenerate after handlers change
//! rpc-typegen generate --prefix /api/
//! ```
//!
//! ### Programmatic Usage
//!
//! ```rust,no_run
//! use rpc_typegen::{generate_from_config, GenerateConfig};
//!
//! let config = GenerateConfig {
//!     entry_dir: "./src/api".to_string(),
//!     endpoint_path_prefix: "/api/".to_string(),
//!     ..Default::default()
//! };
//!
//! let summary = generate_from_config(&config)?;
//! println!("{} endpoints", summary.endpoint_count);
//! # Ok::<(), rpc_typegen::Error>(())
//! ```
//!
//! ## Example
//!
//! Given `src/api/record/getRecord.ts`:
//!
//! ```typescript
//! export type GetRecordRequest = { id: string };
//! export type GetRecordResponse = { id: string; name: string };
//!
//! export default async function getRecord(body: GetRecordRequest): Promise<GetRecordResponse> {
//!     return { id: body.id, name: 'first' };
//! }
//! ```
//!
//! the router serves `POST /record/getRecord` and the client gains:
//!
//! ```typescript
//! const api = new RpcClient({ baseUrl: 'http://localhost:5003' });
//! const record = await api.record.getRecord({ id: '1' });
//! ```
//!
//! ## Configuration
//!
//! Configure via `rpc-typegen.json` or the `rpcTypegen` key of `package.json`:
//!
//! ```json
//! {
//!   "entryDir": "./src/api",
//!   "endpointPathPrefix": "/api/",
//!   "routerPath": "src/rpcRouter.ts",
//!   "clientOutDir": "src/client",
//!   "clientName": "RpcClient",
//!   "bundle": { "outDir": "dist" }
//! }
//! ```

pub mod analysis;
pub mod build;
mod error;
pub mod generators;
pub mod interface;
pub mod models;

pub use error::{Error, Result};
pub use models::*;

pub use interface::config::GenerateConfig;
pub use interface::generate_from_config;
pub use interface::output::{Logger, ProgressReporter};
pub use interface::GenerationSummary;
