use std::fs::File;
use std::time::Duration;

use celldom::element::{cells, rows};
use celldom::{Element, Event, Key};
use gridwise::document::Document;
use gridwise::{EnhancedTable, TableConfig, run};
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::sync::mpsc;

fn planets() -> Element {
    let row = |name: &str, moons: &str, note: &str| {
        Element::tr()
            .child(Element::td(name))
            .child(Element::td(moons))
            .child(Element::td(note))
    };
    Element::table()
        .id("planets")
        .child(
            Element::thead().child(
                Element::tr()
                    .child(Element::th("Planet").id("planet"))
                    .child(Element::th("Moons").id("moons"))
                    .child(Element::th("Notes")),
            ),
        )
        .child(
            Element::tbody()
                .child(row("mars", "2", "Phobos and Deimos"))
                .child(row("Jupiter", "95", "Largest planet in the solar system by a wide margin"))
                .child(row("earth", "1", "Home"))
                .child(row("Saturn", "146", "Rings")),
        )
}

fn print_table(label: &str, table: &EnhancedTable) {
    println!("-- {label}");
    let Some(element) = table.table() else {
        return;
    };
    for row in rows(element) {
        let texts: Vec<String> = cells(row).map(|c| format!("{:<12}", c.text_content())).collect();
        println!("{}", texts.join(" | "));
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let log_file = File::create("scripted.log")?;
    WriteLogger::init(LevelFilter::Trace, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let config = TableConfig::new()
        .sortable_attribute("1,2")
        .expect("valid sortable columns");
    let host = EnhancedTable::host_element().child(planets());
    let mut table = EnhancedTable::new(config, host, Document::new()).with_viewport(60, 20);
    if let Err(err) = table.mount() {
        eprintln!("mount failed: {err}");
        return Ok(());
    }
    print_table("as written", &table);

    let (tx, rx) = mpsc::unbounded_channel();
    let driver = tokio::spawn(run(table, rx));

    // The open button only shows once a narrow resize has settled.
    let script = [
        vec![
            Event::click("planet"),
            Event::click("moons"),
            Event::Resize { width: 20, height: 40 },
        ],
        vec![Event::click("full-screen--open"), Event::key(Key::Escape)],
    ];
    for batch in script {
        for event in batch {
            if tx.send(event).is_err() {
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
    drop(tx);

    let mut table = match driver.await {
        Ok(table) => table,
        Err(err) => {
            eprintln!("driver failed: {err}");
            return Ok(());
        }
    };
    print_table("after sorting", &table);
    for event in table.drain_events() {
        println!("{event:?}");
    }
    Ok(())
}
