//! # Vitae CLI
//!
//! Usage:
//!   vitae resume.json -o resume.pdf
//!   echo '{ ... }' | vitae -o resume.pdf
//!   vitae --example > resume.json

use std::env;
use std::fs;
use std::io::{self, Read};

fn main() {
    let args: Vec<String> = env::args().collect();

    // Handle --example flag
    if args.iter().any(|a| a == "--example") {
        print!("{}", example_resume_json());
        return;
    }

    // Read input
    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1]).expect("Failed to read input file")
    } else {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).expect("Failed to read stdin");
        buf
    };

    // Parse output path
    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| "resume.pdf".to_string());

    // Render
    match vitae::render_json(&input) {
        Ok(pdf_bytes) => {
            fs::write(&output_path, &pdf_bytes).expect("Failed to write PDF");
            eprintln!(
                "✓ Written {} bytes to {}",
                pdf_bytes.len(),
                output_path
            );
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

fn example_resume_json() -> &'static str {
    r##"{
  "metadata": {
    "title": "Priya Raman — Resume",
    "author": "Priya Raman"
  },
  "identity": {
    "name": "Priya Raman",
    "title": "Senior Backend Engineer",
    "email": "priya.raman@example.com",
    "phone": "+91 98765 43210",
    "location": "Bengaluru, India",
    "website": "https://priya.dev",
    "linkedin": "linkedin.com/in/priyaraman"
  },
  "summary": "Backend engineer with eight years of experience building payment and logistics platforms. Comfortable owning a service from schema design through on-call. Looking for a role with real distributed-systems depth.",
  "skills": ["Rust", "PostgreSQL", "Kafka", "Kubernetes", "gRPC", "Terraform"],
  "experience": [
    {
      "role": "Senior Backend Engineer",
      "company": "Finch Payments",
      "period": "2021 — present",
      "description": "Led the ledger rewrite that cut settlement latency from hours to minutes\nDesigned the idempotency layer used by every public API endpoint\nMentored four engineers through promotion"
    },
    {
      "role": "Backend Engineer",
      "company": "Trellis Logistics",
      "period": "2017 — 2021",
      "description": "• Built the route-planning service handling 2M shipments a month\n• Migrated the order store from MySQL to PostgreSQL with zero downtime"
    }
  ],
  "education": [
    {
      "degree": "B.E. Computer Science",
      "institution": "BMS College of Engineering",
      "year": "2017",
      "score": "8.9 CGPA"
    }
  ],
  "projects": [
    {
      "name": "ledgerline",
      "link": "github.com/priyaraman/ledgerline",
      "description": "Append-only double-entry ledger library in Rust"
    }
  ],
  "certifications": [
    { "name": "CKA", "issuer": "CNCF", "year": "2023" }
  ],
  "languages": "English, Hindi, Tamil",
  "activities": [
    { "name": "Rust Bangalore", "description": "co-organizer, monthly meetup" }
  ]
}"##
}
