//! Fetch `/` from a host through a proxy chain.
//!
//! ```text
//! cargo run --example tunnel -- example.com 80 socks5://127.0.0.1:9050 http://10.0.0.2:3128
//! ```

use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let host = args.next().ok_or("usage: tunnel <host> <port> <proxy>...")?;
    let port: u16 = args.next().ok_or("missing port")?.parse()?;
    let proxies: Vec<String> = args.collect();

    let mut stream = chainsock::chain()
        .hops(&proxies)
        .timeout_millis(5_000)
        .connect((host.as_str(), port))
        .await?;

    let request = format!("GET / HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await?;

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await?;
    println!("{}", String::from_utf8_lossy(&response));
    Ok(())
}
