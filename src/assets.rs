use rust_embed::RustEmbed;
use std::borrow::Cow;

#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Asset;

fn get_asset_bytes(name: &str) -> Option<Cow<'static, [u8]>> {
    Asset::get(name).map(|f| f.data)
}

pub fn get_asset_text(name: &str) -> Option<String> {
    get_asset_bytes(name).map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}
