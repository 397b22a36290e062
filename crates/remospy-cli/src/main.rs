use std::{env, fs, process::ExitCode, time::Instant};

use remospy::{
    Assembler, CallLog, CapturedCall, GenerationSettings, HierarchyResolver, NoopTracer, RemoteFilter, RenderTracer,
    StderrTracer, instance_path,
};

/// Contents of a capture file.
#[derive(Debug, serde::Deserialize)]
struct CaptureFile {
    #[serde(default)]
    settings: GenerationSettings,
    #[serde(default)]
    filter: RemoteFilter,
    calls: Vec<CapturedCall>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let file_path = if args.len() > 1 { &args[1] } else { "capture.json" };
    let contents = match read_file(file_path) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let capture: CaptureFile = match serde_json::from_str(&contents) {
        Ok(capture) => capture,
        Err(err) => {
            eprintln!("error: {file_path} is not a valid capture file: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut log = CallLog::new(capture.filter);
    let total = capture.calls.len();
    let kept = capture.calls.into_iter().filter_map(|call| log.record(call).then_some(())).count();
    eprintln!("recorded {kept} of {total} calls");

    let start = Instant::now();
    let trace = env::var("REMOSPY_TRACE").is_ok_and(|value| value == "1");
    if trace {
        print_log(&log, Assembler::new(capture.settings).with_tracer(StderrTracer::new()));
    } else {
        print_log(&log, Assembler::new(capture.settings).with_tracer(NoopTracer));
    }
    let elapsed = start.elapsed();
    eprintln!("reconstructed in {elapsed:?}");
    ExitCode::SUCCESS
}

fn print_log<Tr: RenderTracer>(log: &CallLog, mut assembler: Assembler<'_, HierarchyResolver, Tr>) {
    for history in log.visible_remotes() {
        println!("-- ==== {} ====", instance_path(&history.remote));
        for call in &history.calls {
            println!("{}", assembler.assemble(call));
        }
    }
}

fn read_file(file_path: &str) -> Result<String, String> {
    match fs::metadata(file_path) {
        Ok(metadata) => {
            if !metadata.is_file() {
                return Err(format!("{file_path} is not a file"));
            }
        }
        Err(err) => {
            return Err(format!("reading {file_path}: {err}"));
        }
    }
    fs::read_to_string(file_path).map_err(|err| format!("reading {file_path}: {err}"))
}
