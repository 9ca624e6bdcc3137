use csv_tail::{WatchConfig, watch_csv};
use tokio_stream::StreamExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "data.csv".to_string());

    // Print columns 0 and 2 of every row appended to the file
    let config = WatchConfig::builder().columns([0, 2]).seconds(1).build()?;
    let mut stream = watch_csv(&path, config).await?;

    println!("Watching {} - append rows to see output...", path);

    let mut count = 0;
    while let Some(output) = stream.next().await {
        match output {
            Ok(bytes) => {
                count += 1;
                print!("[poll #{}] {}", count, String::from_utf8_lossy(&bytes));
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    Ok(())
}
