use anyhow::Context;

fn main() -> anyhow::Result<()> {
    memedrop::run().context("memedrop failed")
}
