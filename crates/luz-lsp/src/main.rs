// SPDX-License-Identifier: (MIT OR Apache-2.0)

#[tokio::main]
async fn main() {
    luz_lsp::serve_stdio().await;
}
