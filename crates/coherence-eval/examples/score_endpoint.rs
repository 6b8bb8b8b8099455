use coherence_eval::{StructurednessEngine, render_report};
use coherence_sparql::{HttpGateway, HttpGatewayOptions, ProfileOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let endpoint = args
        .next()
        .unwrap_or_else(|| "http://localhost:8890/sparql".to_string());
    let graph = args.next();

    let gateway = HttpGateway::new(&endpoint, HttpGatewayOptions::default())?;
    let mut options = ProfileOptions::default();
    if let Some(graph) = &graph {
        options = options.with_partition(graph)?;
    }

    let result = StructurednessEngine::new(options).run(&gateway).await?;
    println!("{}", render_report(&result.report, &endpoint));
    Ok(())
}
