use clinic_hours::api::{
    EditorConfig, InMemoryTemplateRepository, NotificationKind, NotificationSink,
    WeeklyTemplateStore,
};
use clinic_hours::core::{DayOfWeek, Doctor, Work};
use clinic_hours::interaction::DragKind;
use clinic_hours::telemetry;

struct StdoutNotifications;

impl NotificationSink for StdoutNotifications {
    fn notify(&mut self, kind: NotificationKind, message: &str) {
        println!("[{kind:?}] {message}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = telemetry::init_default_tracing();

    let mut store: WeeklyTemplateStore =
        WeeklyTemplateStore::new("clinic-42", EditorConfig::default())?;
    let monday = DayOfWeek::new(1)?;
    let tuesday = DayOfWeek::new(2)?;

    let editor = store.day_mut(monday);
    editor.set_bar_geometry(0.0, 1000.0)?;
    let morning = editor.create_block_at(375.0).ok_or("no room for a morning shift")?;
    let evening = editor.create_block_at(750.0).ok_or("no room for an evening shift")?;
    editor.rename_block(evening, "Evening clinic");
    editor.set_block_works(morning, vec![Work::named("Vaccination")]);

    editor.pointer_down(morning, DragKind::ResizeEnd, 458.0);
    editor.pointer_move(520.0);
    editor.pointer_up();
    editor.tick();

    let directory = vec![Doctor {
        id: Some("doc-1".to_owned()),
        name: "Dr. Lin".to_owned(),
        specialties: vec!["internal medicine".to_owned()],
    }];
    store.assign_doctor(monday, morning, 0, "Dr. Lin", &directory)?;
    store.copy_from_previous_day(tuesday)?;

    for day in [monday, tuesday] {
        let frame = store.day(day).build_frame();
        for block in &frame.blocks {
            println!(
                "{} {:<16} {} left={:.1}% width={:.1}%",
                frame.label, block.name, block.label, block.left_percent, block.width_percent
            );
        }
    }

    let mut repository = InMemoryTemplateRepository::new();
    store.save(&mut repository, &mut StdoutNotifications)?;
    println!("{}", store.to_persisted().to_json_pretty()?);

    Ok(())
}
