fn main() {
  mintlist::main();
}
