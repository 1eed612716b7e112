use anyhow::{Context, Result};
use cnpj_ledger::{
    export_companies_to_path, export_transactions_to_path, format_money, Cnpj, Company,
    CompanyRegistry, Ledger, ReportConfig,
};
use rust_decimal::Decimal;
use std::env;

fn money(value: Option<Decimal>) -> String {
    value.map_or_else(|| "overflow".to_string(), format_money)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = match env::args().nth(1) {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };

    let a = Cnpj::parse("11.222.333/0001-81", config.validation)?;
    let b = Cnpj::parse("22.333.444/0001-92", config.validation)?;
    let c = Cnpj::parse("33.444.555/0001-03", config.validation)?;

    let mut registry = CompanyRegistry::new();
    registry.register(Company::new(
        a,
        "Empresa Fictícia A",
        "Av. Exemplo, 123",
        150,
        Decimal::new(1_500_000, 0),
    ))?;
    registry.register(Company::new(
        b,
        "Empresa Fictícia B",
        "Rua Teste, 456",
        75,
        Decimal::new(850_000, 0),
    ))?;

    let mut ledger = Ledger::new();
    ledger.insert(a, b, Decimal::new(15_000, 0), "Pagamento de serviços");
    ledger.insert(b, c, Decimal::new(7_500, 0), "Compra de materiais");
    ledger.insert(c, a, Decimal::new(22_000, 0), "Consultoria técnica");
    ledger.insert(a, c, Decimal::new(8_000, 0), "Manutenção de equipamentos");

    println!("📒 {} transactions, {} companies", ledger.len(), registry.len());
    for company in registry.iter() {
        let cnpj = company.cnpj();
        println!(
            "{} | {} | tax R$ {} | balance R$ {} | transaction tax R$ {}",
            cnpj,
            company.name,
            money(company.tax()),
            money(ledger.balance(&cnpj)),
            money(ledger.total_tax(&cnpj)),
        );
    }

    export_companies_to_path(&registry, &config.companies_report)
        .with_context(|| format!("Failed to export companies to {:?}", config.companies_report))?;
    export_transactions_to_path(&ledger, &config.transactions_report).with_context(|| {
        format!("Failed to export transactions to {:?}", config.transactions_report)
    })?;
    println!(
        "✓ Exported {:?} and {:?}",
        config.companies_report, config.transactions_report
    );

    Ok(())
}
