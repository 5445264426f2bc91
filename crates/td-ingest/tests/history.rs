use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;

use td_ingest::{DatasetKind, load_history, load_latest};
use td_model::Column;

const INVESTORS_HEADER: &str = "Codigo do Investidor;Data de Adesao;Estado Civil;Genero;Profissao;Idade;UF do Investidor;Cidade do Investidor;Pais do Investidor;Situacao da Conta;Operou 12 Meses";

fn investor_row(id: u32, join_date: &str) -> String {
    format!("{id};{join_date};Solteiro;M;Engenheiro;30;SP;Sao Paulo;BR;Ativa;S")
}

fn write_csv(dir: &Path, name: &str, lines: &[String]) {
    fs::write(dir.join(name), lines.join("\n")).expect("write csv");
}

#[test]
fn investor_history_dedups_and_applies_cutoff() {
    let dir = TempDir::new().unwrap();
    // Two overlapping yearly snapshots: investor 1 appears in both, and
    // investor 3 carries a pre-2000 join date artifact.
    write_csv(
        dir.path(),
        "investidores-do-tesouro-direto-2023@20240101T000000.csv",
        &[
            INVESTORS_HEADER.to_string(),
            investor_row(1, "05/06/2023"),
            investor_row(3, "01/01/1900"),
        ],
    );
    write_csv(
        dir.path(),
        "investidores-do-tesouro-direto-2024@20250101T000000.csv",
        &[
            INVESTORS_HEADER.to_string(),
            investor_row(1, "05/06/2023"),
            investor_row(2, "10/02/2024"),
        ],
    );

    let table = load_history(dir.path(), DatasetKind::Investors).unwrap();

    let ids: Vec<i64> = table
        .rows
        .iter()
        .map(|row| row.get(Column::InvestorId).as_int().unwrap())
        .collect();
    // Duplicate (1, 2023-06-05) collapsed, pre-2000 artifact dropped,
    // earliest snapshot's rows first.
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn same_investor_with_different_join_dates_is_kept_twice() {
    let dir = TempDir::new().unwrap();
    write_csv(
        dir.path(),
        "investidores-do-tesouro-direto-2024@20250101T000000.csv",
        &[
            INVESTORS_HEADER.to_string(),
            investor_row(7, "05/06/2023"),
            investor_row(7, "06/06/2023"),
        ],
    );
    let table = load_history(dir.path(), DatasetKind::Investors).unwrap();
    assert_eq!(table.len(), 2);
}

#[test]
fn operations_history_concatenates_without_dedup() {
    let dir = TempDir::new().unwrap();
    let header = "Codigo do Investidor;Data da Operacao;Tipo Titulo;Vencimento do Titulo;Quantidade;Valor do Titulo;Valor da Operacao;Tipo da Operacao;Canal da Operacao";
    let row = "456;15/05/2024;Tesouro Selic;01/03/2029;1,5;1000,00;1500,00;C;Site";
    write_csv(
        dir.path(),
        "operacoes-do-tesouro-direto-2023@20240101T000000.csv",
        &[header.to_string(), row.to_string()],
    );
    write_csv(
        dir.path(),
        "operacoes-do-tesouro-direto-2024@20250101T000000.csv",
        &[header.to_string(), row.to_string()],
    );

    let table = load_history(dir.path(), DatasetKind::Operations).unwrap();
    // Identical rows across snapshots survive: operations are assumed
    // append-only, no identity key is applied.
    assert_eq!(table.len(), 2);
}

#[test]
fn load_latest_picks_the_newest_snapshot() {
    let dir = TempDir::new().unwrap();
    let header = "Tipo Titulo;Vencimento do Titulo;Data Venda;PU;Quantidade;Valor";
    write_csv(
        dir.path(),
        "vendas-do-tesouro-direto-geral@20240101T000000.csv",
        &[
            header.to_string(),
            "Tesouro Selic;01/03/2029;02/01/2024;100,00;1,0;100,00".to_string(),
        ],
    );
    write_csv(
        dir.path(),
        "vendas-do-tesouro-direto-geral@20240601T000000.csv",
        &[
            header.to_string(),
            "Tesouro Selic;01/03/2029;03/06/2024;101,00;1,0;101,00".to_string(),
        ],
    );

    let table = load_latest(dir.path(), DatasetKind::Sales).unwrap().unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.rows[0].get(Column::SaleDate).as_date(),
        Some(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap())
    );
}

#[test]
fn load_latest_of_absent_dataset_is_none() {
    let dir = TempDir::new().unwrap();
    assert!(load_latest(dir.path(), DatasetKind::Prices).unwrap().is_none());
}

#[test]
fn history_of_absent_dataset_is_an_empty_table() {
    let dir = TempDir::new().unwrap();
    let table = load_history(dir.path(), DatasetKind::Operations).unwrap();
    assert!(table.is_empty());
    assert!(!table.columns.is_empty());
}
