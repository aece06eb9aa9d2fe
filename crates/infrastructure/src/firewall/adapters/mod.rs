pub mod linux;
pub mod macos;
pub mod windows;

pub use linux::LinuxFirewallAdapter;
pub use macos::MacOsFirewallAdapter;
pub use windows::WindowsFirewallAdapter;
