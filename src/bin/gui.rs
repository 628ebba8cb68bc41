fn main() {
    env_logger::init();

    let presenter_factory = julia_explorer::PixelsPresenterFactory::new();
    let command =
        julia_explorer::RunGuiCommand::new(presenter_factory, julia_explorer::ExplorerConfig::default());

    command.execute();
}
