fn main() {
    // Only compile Windows resources on Windows target
    #[cfg(target_os = "windows")]
    {
        // Version metadata shown in Explorer and Task Manager
        let _ = embed_resource::compile("resources/windows/podium.rc", embed_resource::NONE);
    }
}
