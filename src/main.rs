use voxel_f1::SceneConfig;

fn main() -> anyhow::Result<()> {
    voxel_f1::run(SceneConfig::default())
}
