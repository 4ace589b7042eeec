use bugreport::{
    bugreport,
    collector::{CompileTimeInformation, EnvironmentVariables, OperatingSystem, SoftwareVersion},
    format::Markdown,
};

pub fn run() {
    bugreport!()
        .info(SoftwareVersion::default())
        .info(OperatingSystem::default())
        .info(EnvironmentVariables::list(&[
            "SHELL",
            "TERM",
            "MSTORE_DATA_DIR",
            "MSTORE_DATA_FILE",
            "MSTORE_MEDIA_DIR",
            "MSTORE_PORT",
        ]))
        .info(CompileTimeInformation::default())
        .print::<Markdown>();
}
